use super::*;
use crate::chord::{Chord, ChordType, PositionFilter};
use crate::error::FretError;
use crate::fretmap::{FretMap, FretPosition};
use crate::instrument::{GuitarTuning, Instrument};
use crate::pitch::{AbsolutePitch, PitchClass};
use crate::progression::{expand, KeyQuality};
use crate::scale::ScaleType;
use PitchClass::*;

fn names(pitches: &[AbsolutePitch]) -> Vec<String> {
    pitches.iter().map(|p| p.to_string()).collect()
}

fn filtered(chord: Chord, positions: &[(usize, u8)]) -> Chord {
    Chord {
        filter: PositionFilter::Filtered(positions.iter().map(|&(s, f)| FretPosition::new(s, f)).collect()),
        ..chord
    }
}

const EPSILON: f64 = 1e-9;

#[test]
fn test_simple_voicing_anchor() {
    let guitar = FretMap::default();
    let voicing = simple_voicing(&guitar, &Chord::new(C, ChordType::Major7));
    assert_eq!(names(&voicing), ["C3", "E3", "G3", "B3"]);

    // Bass4 lowest base octave is 1, so the anchor is octave 2.
    let bass = FretMap::new(Instrument::Bass4, GuitarTuning::Standard, 12);
    let voicing = simple_voicing(&bass, &Chord::new(G, ChordType::Dominant7));
    assert_eq!(names(&voicing), ["G2", "B2", "D3", "F3"]);
}

#[test]
fn test_simple_voicing_crosses_octave() {
    let guitar = FretMap::default();
    let voicing = simple_voicing(&guitar, &Chord::new(A, ChordType::Minor));
    assert_eq!(names(&voicing), ["A3", "C4", "E4"]);
}

#[test]
fn test_fretted_voicing_standard_guitar() {
    let guitar = FretMap::default();
    let voicing = fretted_voicing(&guitar, &Chord::new(C, ChordType::Major)).unwrap();
    // Octaves come from each string's base octave below fret 12.
    assert_eq!(names(&voicing), ["E2", "C2", "E3", "G3", "C3", "E4"]);
}

#[test]
fn test_fretted_voicing_skips_doubled_strings() {
    let mandolin = FretMap::new(Instrument::Mandolin, GuitarTuning::Standard, 12);
    let voicing = fretted_voicing(&mandolin, &Chord::new(G, ChordType::Major)).unwrap();
    assert_eq!(voicing.len(), 4);
}

#[test]
fn test_fretted_and_simple_voicings_differ() {
    let guitar = FretMap::default();
    let chord = Chord::new(C, ChordType::Major);
    let simple = simple_voicing(&guitar, &chord);
    let fretted = fretted_voicing(&guitar, &chord).unwrap();
    assert_ne!(simple, fretted);
}

#[test]
fn test_filtered_voicing_sorted_and_deduplicated() {
    let guitar = FretMap::default();
    // G string fret 9 and D string fret 2 are both E3.
    let positions = [FretPosition::new(2, 9), FretPosition::new(3, 2), FretPosition::new(5, 0)];
    let voicing = filtered_voicing(&guitar, &positions).unwrap();
    assert_eq!(names(&voicing), ["E2", "E3"]);
}

#[test]
fn test_filtered_voicing_triggers_course_partner() {
    let mandolin = FretMap::new(Instrument::Mandolin, GuitarTuning::Standard, 12);
    // Primary G string (index 6, octave 2); its partner is index 7.
    let voicing = filtered_voicing(&mandolin, &[FretPosition::new(6, 2)]).unwrap();
    assert_eq!(names(&voicing), ["A2"]);

    let course = mandolin.course_partners(6).unwrap();
    assert_eq!(course, vec![7]);
}

#[test]
fn test_filtered_voicing_beyond_live_frets() {
    let short = FretMap::new(Instrument::Guitar, GuitarTuning::Standard, 5);
    let voicing = filtered_voicing(&short, &[FretPosition::new(5, 12)]).unwrap();
    assert_eq!(names(&voicing), ["E3"]);
}

#[test]
fn test_chord_voicing_paths() {
    let guitar = FretMap::default();
    let chord = Chord::new(A, ChordType::Minor);
    assert_eq!(chord_voicing(&guitar, &chord, false).unwrap(), simple_voicing(&guitar, &chord));
    assert_eq!(
        chord_voicing(&guitar, &chord, true).unwrap(),
        fretted_voicing(&guitar, &chord).unwrap()
    );

    let picked = filtered(chord.clone(), &[(4, 0), (3, 2)]);
    assert_eq!(names(&chord_voicing(&guitar, &picked, false).unwrap()), ["A2", "E3"]);
    // A filter wins over the fretted scan.
    assert_eq!(names(&chord_voicing(&guitar, &picked, true).unwrap()), ["A2", "E3"]);

    let silent = filtered(chord, &[]);
    assert!(chord_voicing(&guitar, &silent, false).unwrap().is_empty());
}

#[test]
fn test_chord_voicing_rejects_invalid_chord() {
    let bass = FretMap::new(Instrument::Bass4, GuitarTuning::Standard, 12);
    let chord = filtered(Chord::new(E, ChordType::Major), &[(5, 0)]);
    assert!(matches!(chord_voicing(&bass, &chord, false), Err(FretError::InvalidChord(_))));
}

#[test]
fn test_harmony_all_at_zero() {
    let guitar = FretMap::default();
    let schedule = schedule_chord(&guitar, &Chord::new(C, ChordType::Major), &PlaybackOptions::default()).unwrap();

    assert_eq!(schedule.program, 24);
    assert_eq!(schedule.events.len(), 3);
    assert!(schedule.events.iter().all(|e| e.start == 0.0 && e.duration == 2.0));
    assert!(schedule.events.iter().all(|e| (e.velocity - 0.6).abs() < 1e-6));
    assert_eq!(schedule.total_duration, 2.0);
}

#[test]
fn test_strum_offsets_and_direction() {
    let guitar = FretMap::default();
    let chord = Chord::new(C, ChordType::Major);
    let mut options = PlaybackOptions {
        style: PlaybackStyle::Strum,
        ..PlaybackOptions::default()
    };

    let down = schedule_chord(&guitar, &chord, &options).unwrap();
    let starts: Vec<f64> = down.events.iter().map(|e| e.start).collect();
    assert!((starts[1] - STRUM_DELAY).abs() < EPSILON);
    assert!((starts[2] - 2.0 * STRUM_DELAY).abs() < EPSILON);
    assert_eq!(down.events[0].name, "C3");
    // Every string is released together.
    assert!(down.events.iter().all(|e| (e.end() - 2.0).abs() < EPSILON));

    options.direction = StrumDirection::Up;
    let up = schedule_chord(&guitar, &chord, &options).unwrap();
    assert_eq!(up.events[0].name, "G3");
    assert_eq!(up.events[2].name, "C3");
}

#[test]
fn test_short_strum_keeps_every_string_sounding() {
    let guitar = FretMap::default();
    let chords = expand("I-V", C, KeyQuality::Major, true);
    let options = PlaybackOptions {
        style: PlaybackStyle::Strum,
        chord_duration: 0.25,
        fretted: true,
        ..PlaybackOptions::default()
    };
    let schedule = schedule_progression(&guitar, &chords, &options).unwrap();

    assert_eq!(schedule.events.len(), 12);
    assert!(schedule.events.iter().all(|e| e.duration > 0.0));
    for index in 0..chords.len() {
        let events: Vec<&NoteEvent> = schedule.chord_events(index).collect();
        let step = events[1].start - events[0].start;
        assert!(step > 0.0 && step < STRUM_DELAY);
        assert!(events.windows(2).all(|w| (w[1].start - w[0].start - step).abs() < EPSILON));
        let release = events[0].end();
        assert!(events.iter().all(|e| (e.end() - release).abs() < EPSILON));
    }
}

#[test]
fn test_arpeggio_patterns() {
    let notes: Vec<AbsolutePitch> = ["E3", "C3", "G3", "C3"].iter().map(|n| n.parse().unwrap()).collect();

    assert_eq!(names(&arpeggio_order(&notes, ArpeggioPattern::Ascending)), ["C3", "E3", "G3"]);
    assert_eq!(names(&arpeggio_order(&notes, ArpeggioPattern::Descending)), ["G3", "E3", "C3"]);
    assert_eq!(names(&arpeggio_order(&notes, ArpeggioPattern::Alternating)), ["C3", "E3", "G3", "E3"]);

    let pair = &notes[..2];
    assert_eq!(names(&arpeggio_order(pair, ArpeggioPattern::Alternating)), ["C3", "E3"]);
}

#[test]
fn test_arpeggio_subdivides_duration() {
    let guitar = FretMap::default();
    let options = PlaybackOptions {
        style: PlaybackStyle::Arpeggio,
        chord_duration: 2.0,
        ..PlaybackOptions::default()
    };
    let schedule = schedule_chord(&guitar, &Chord::new(C, ChordType::Major7), &options).unwrap();

    assert_eq!(schedule.events.len(), 4);
    for (i, e) in schedule.events.iter().enumerate() {
        assert!((e.start - i as f64 * 0.5).abs() < EPSILON);
        assert!(e.end() <= 2.0 + EPSILON);
    }
    assert!((schedule.events[0].duration - 0.6).abs() < EPSILON);
}

#[test]
fn test_progression_chords_in_sequence() {
    let guitar = FretMap::default();
    let chords = expand("I-vi-IV-V", C, KeyQuality::Major, true);

    for style in [PlaybackStyle::Harmony, PlaybackStyle::Strum, PlaybackStyle::Arpeggio] {
        let options = PlaybackOptions {
            style,
            chord_duration: 1.5,
            ..PlaybackOptions::default()
        };
        let schedule = schedule_progression(&guitar, &chords, &options).unwrap();
        assert!((schedule.total_duration - 6.0).abs() < EPSILON);

        for index in 0..chords.len() {
            let slot_start = index as f64 * 1.5;
            let mut events = schedule.chord_events(index).peekable();
            assert!(events.peek().is_some());
            for e in events {
                assert!(e.start >= slot_start - EPSILON);
                assert!(e.end() <= slot_start + 1.5 + EPSILON, "{:?} overlaps the next chord", style);
            }
        }

        let starts: Vec<f64> = schedule.events.iter().map(|e| e.start).collect();
        assert!(starts.windows(2).all(|w| w[0] <= w[1]));
    }
}

#[test]
fn test_progression_harmony_sound_ratio() {
    let guitar = FretMap::default();
    let chords = expand("ii-V", D, KeyQuality::Major, false);
    let schedule = schedule_progression(&guitar, &chords, &PlaybackOptions::default()).unwrap();

    let second: Vec<&NoteEvent> = schedule.chord_events(1).collect();
    assert!(second.iter().all(|e| (e.start - 2.0).abs() < EPSILON));
    assert!(second.iter().all(|e| (e.duration - 1.8).abs() < EPSILON));
}

#[test]
fn test_invalid_duration() {
    let guitar = FretMap::default();
    let options = PlaybackOptions {
        chord_duration: 0.0,
        ..PlaybackOptions::default()
    };
    let result = schedule_chord(&guitar, &Chord::new(C, ChordType::Major), &options);
    assert!(matches!(result, Err(FretError::InvalidPlaybackStyle(_))));
}

#[test]
fn test_program_follows_instrument() {
    let chord = Chord::new(E, ChordType::Minor).with_mode(ScaleType::Dorian).unwrap();
    let bass = FretMap::new(Instrument::Bass5, GuitarTuning::Standard, 12);
    let banjo = FretMap::new(Instrument::Banjo, GuitarTuning::Standard, 12);
    let options = PlaybackOptions::default();
    assert_eq!(schedule_chord(&bass, &chord, &options).unwrap().program, 33);
    assert_eq!(schedule_chord(&banjo, &chord, &options).unwrap().program, 105);
}

#[derive(Default)]
struct RecordingSink {
    played: Vec<String>,
    stops: usize,
}

impl PlaybackSink for RecordingSink {
    fn play_event(&mut self, event: &NoteEvent) {
        self.played.push(event.name.clone());
    }

    fn stop_all(&mut self) {
        self.played.clear();
        self.stops += 1;
    }
}

#[test]
fn test_play_into_sink() {
    let guitar = FretMap::default();
    let schedule = schedule_chord(&guitar, &Chord::new(G, ChordType::Major), &PlaybackOptions::default()).unwrap();

    let mut sink = RecordingSink::default();
    schedule.play_into(&mut sink);
    assert_eq!(sink.played, ["G3", "B3", "D4"]);

    sink.stop_all();
    sink.stop_all();
    assert!(sink.played.is_empty());
    assert_eq!(sink.stops, 2);
}

#[test]
fn test_style_parsing() {
    assert_eq!("Strum".parse::<PlaybackStyle>().unwrap(), PlaybackStyle::Strum);
    assert_eq!("up".parse::<StrumDirection>().unwrap(), StrumDirection::Up);
    assert_eq!("up-down".parse::<ArpeggioPattern>().unwrap(), ArpeggioPattern::Alternating);
    assert!(matches!(
        "shuffle".parse::<PlaybackStyle>(),
        Err(FretError::InvalidPlaybackStyle(_))
    ));
}

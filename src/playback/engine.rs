//! Playback schedule generation
//!
//! Turns chords into timed note events. Chord `i` of a progression owns the
//! slot `[i * chord_duration, (i + 1) * chord_duration)` and every one of its
//! notes ends inside that slot, so chords play strictly in sequence.

use tracing::debug;

use crate::chord::Chord;
use crate::error::FretError;
use crate::fretmap::FretMap;
use crate::pitch::AbsolutePitch;
use super::types::{ArpeggioPattern, NoteEvent, PlaybackOptions, PlaybackStyle, Schedule, StrumDirection};
use super::voicing::chord_voicing;

/// Delay between successive strings of a strum, in seconds. Short chords
/// shrink it so the whole strum fits in the first half of the chord.
pub const STRUM_DELAY: f64 = 0.08;

/// Share of a progression slot a chord sounds for; the rest is a gap.
const SOUND_RATIO: f64 = 0.9;

/// Arpeggio notes ring past their slot by this factor.
const ARPEGGIO_OVERLAP: f64 = 1.2;

const HARMONY_VELOCITY: f32 = 0.6;
const STRUM_VELOCITY: f32 = 0.7;
const ARPEGGIO_VELOCITY: f32 = 0.6;

fn event(note: AbsolutePitch, start: f64, duration: f64, velocity: f32, chord_index: usize) -> NoteEvent {
    NoteEvent {
        note,
        name: note.to_string(),
        midi: note.midi().clamp(0, 127) as u8,
        frequency: note.frequency(),
        start,
        duration,
        velocity,
        chord_index,
    }
}

/// Order arpeggio notes: deduplicated, sorted, then arranged by `pattern`.
pub fn arpeggio_order(voicing: &[AbsolutePitch], pattern: ArpeggioPattern) -> Vec<AbsolutePitch> {
    let mut notes = voicing.to_vec();
    notes.sort_by_key(|note| note.midi());
    notes.dedup();

    match pattern {
        ArpeggioPattern::Ascending => notes,
        ArpeggioPattern::Descending => {
            notes.reverse();
            notes
        }
        ArpeggioPattern::Alternating => {
            let mut order = notes.clone();
            if notes.len() > 2 {
                order.extend(notes[1..notes.len() - 1].iter().rev());
            }
            order
        }
    }
}

/// Events for one voicing starting at `offset` and sounding for `length`.
fn voice_events(
    voicing: &[AbsolutePitch],
    options: &PlaybackOptions,
    offset: f64,
    length: f64,
    chord_index: usize,
) -> Vec<NoteEvent> {
    match options.style {
        PlaybackStyle::Harmony => voicing
            .iter()
            .map(|&note| event(note, offset, length, HARMONY_VELOCITY, chord_index))
            .collect(),
        PlaybackStyle::Strum => {
            let mut order = voicing.to_vec();
            if options.direction == StrumDirection::Up {
                order.reverse();
            }
            let step = STRUM_DELAY.min(length / (2.0 * order.len().max(1) as f64));
            // Strings keep ringing until the chord is released.
            order
                .into_iter()
                .enumerate()
                .map(|(i, note)| {
                    let delay = i as f64 * step;
                    event(note, offset + delay, length - delay, STRUM_VELOCITY, chord_index)
                })
                .collect()
        }
        PlaybackStyle::Arpeggio => {
            let order = arpeggio_order(voicing, options.pattern);
            if order.is_empty() {
                return Vec::new();
            }
            let slot = length / order.len() as f64;
            order
                .into_iter()
                .enumerate()
                .map(|(i, note)| {
                    let start = i as f64 * slot;
                    let duration = (slot * ARPEGGIO_OVERLAP).min(length - start);
                    event(note, offset + start, duration, ARPEGGIO_VELOCITY, chord_index)
                })
                .collect()
        }
    }
}

fn check_duration(options: &PlaybackOptions) -> Result<(), FretError> {
    if options.chord_duration.is_finite() && options.chord_duration > 0.0 {
        Ok(())
    } else {
        Err(FretError::InvalidPlaybackStyle(format!(
            "chord duration must be a positive number of seconds, got {}",
            options.chord_duration
        )))
    }
}

/// Schedule a single chord, sounding for the full chord duration.
pub fn schedule_chord(fret_map: &FretMap, chord: &Chord, options: &PlaybackOptions) -> Result<Schedule, FretError> {
    check_duration(options)?;
    let voicing = chord_voicing(fret_map, chord, options.fretted)?;
    let events = voice_events(&voicing, options, 0.0, options.chord_duration, 0);

    debug!(chord = %chord.symbol(), style = ?options.style, notes = events.len(), "scheduled chord");

    Ok(Schedule {
        program: fret_map.instrument().midi_program(),
        events,
        total_duration: options.chord_duration,
    })
}

/// Schedule a progression, one chord per slot.
///
/// Chord `i` starts at `i * chord_duration` and sounds for 90% of the slot.
/// An invalid chord fails the whole schedule rather than leaving a silent gap.
pub fn schedule_progression(
    fret_map: &FretMap,
    chords: &[Chord],
    options: &PlaybackOptions,
) -> Result<Schedule, FretError> {
    check_duration(options)?;
    let length = options.chord_duration * SOUND_RATIO;
    let mut events = Vec::new();

    for (index, chord) in chords.iter().enumerate() {
        let voicing = chord_voicing(fret_map, chord, options.fretted)?;
        let offset = index as f64 * options.chord_duration;
        events.extend(voice_events(&voicing, options, offset, length, index));
    }
    events.sort_by(|a, b| a.start.total_cmp(&b.start));

    debug!(
        chords = chords.len(),
        style = ?options.style,
        notes = events.len(),
        "scheduled progression"
    );

    Ok(Schedule {
        program: fret_map.instrument().midi_program(),
        events,
        total_duration: chords.len() as f64 * options.chord_duration,
    })
}

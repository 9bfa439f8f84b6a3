//! Chord voicings: which octave-qualified pitches sound for a chord.

use crate::chord::{Chord, PositionFilter};
use crate::error::FretError;
use crate::fretmap::{FretMap, FretPosition, MAX_FRETS};
use crate::pitch::AbsolutePitch;

/// Frets scanned when looking for a playable chord tone on each string.
const VOICING_SPAN: u8 = 12;

/// Root-position voicing: the root one octave above the instrument's lowest
/// base octave, then each chord interval above it.
pub fn simple_voicing(fret_map: &FretMap, chord: &Chord) -> Vec<AbsolutePitch> {
    let anchor = fret_map.tuning().base_octaves.iter().copied().min().unwrap_or(3) + 1;
    let root = AbsolutePitch::new(chord.root, anchor);
    chord
        .chord_type
        .intervals()
        .iter()
        .map(|&interval| root.transpose(interval as i32))
        .collect()
}

/// The lowest chord tone on each primary string within the first octave of
/// frets, lowest string first.
pub fn fretted_voicing(fret_map: &FretMap, chord: &Chord) -> Result<Vec<AbsolutePitch>, FretError> {
    let board = fret_map.with_frets(VOICING_SPAN);
    let tones = crate::chord::notes_of(chord.root, chord.chord_type);
    let mut pitches = Vec::with_capacity(board.string_count());

    for string in (0..board.string_count()).rev().filter(|&s| board.is_primary_string(s)) {
        for fret in 0..=VOICING_SPAN {
            if tones.contains(&board.pitch_at(string, fret)?) {
                pitches.push(board.absolute_pitch(string, fret)?);
                break;
            }
        }
    }
    Ok(pitches)
}

/// Pitches of an explicit set of positions. Each position also sounds the
/// other strings of its course at the same fret. Sorted low to high with
/// duplicates removed.
pub fn filtered_voicing<'a, I>(fret_map: &FretMap, positions: I) -> Result<Vec<AbsolutePitch>, FretError>
where
    I: IntoIterator<Item = &'a FretPosition>,
{
    let board = fret_map.with_frets(MAX_FRETS);
    let mut pitches = Vec::new();

    for position in positions {
        pitches.push(board.absolute_pitch(position.string, position.fret)?);
        for partner in board.course_partners(position.string)? {
            pitches.push(board.absolute_pitch(partner, position.fret)?);
        }
    }

    pitches.sort_by_key(|pitch| pitch.midi());
    pitches.dedup();
    Ok(pitches)
}

/// What plays for `chord`: its filtered positions when a filter is set,
/// otherwise the root-position voicing, or the fretboard scan when `fretted`.
/// An empty filter is silent.
pub fn chord_voicing(fret_map: &FretMap, chord: &Chord, fretted: bool) -> Result<Vec<AbsolutePitch>, FretError> {
    chord.validate(fret_map)?;
    match &chord.filter {
        PositionFilter::Filtered(positions) => filtered_voicing(fret_map, positions),
        PositionFilter::Unfiltered if fretted => fretted_voicing(fret_map, chord),
        PositionFilter::Unfiltered => Ok(simple_voicing(fret_map, chord)),
    }
}

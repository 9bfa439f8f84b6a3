//! # Playback Module
//!
//! Turn chords and progressions into timed note events for an audio backend.
//!
//! ## Purpose
//! The engine decides *what* sounds and *when*:
//! 1. **Voicing** - which octave-qualified pitches realise a chord
//! 2. **Style** - harmony, strum or arpeggio timing within the chord
//! 3. **Sequencing** - one slot per chord of a progression
//!
//! Synthesis and cancellation belong to a [`PlaybackSink`]. The output is a
//! flat [`Schedule`] with no hidden timers, so a sink can stop everything by
//! dropping what it has queued.
//!
//! ## Sub-modules
//! - `types` - Schedule, NoteEvent, PlaybackOptions and style enums
//! - `voicing` - simple, fretted and filtered voicings
//! - `engine` - schedule generation
//!
//! ## Voicings
//!
//! Unfiltered chords play a root-position voicing anchored one octave above
//! the instrument's lowest string, independent of the fretboard. Filtered
//! chords play exactly the selected positions, plus the doubled string of
//! each paired course. The fretboard scan (lowest chord tone per string) is a
//! third, opt-in voicing.
//!
//! ## Example
//! ```rust
//! use fretwise::playback::{schedule_chord, PlaybackOptions};
//! use fretwise::{Chord, ChordType, FretMap, PitchClass};
//!
//! let map = FretMap::default();
//! let chord = Chord::new(PitchClass::A, ChordType::Minor);
//! let schedule = schedule_chord(&map, &chord, &PlaybackOptions::default())?;
//!
//! let names: Vec<&str> = schedule.events.iter().map(|e| e.name.as_str()).collect();
//! assert_eq!(names, ["A3", "C4", "E4"]);
//! assert_eq!(schedule.events[0].midi, 57);
//! # Ok::<(), fretwise::FretError>(())
//! ```

mod types;
mod voicing;
mod engine;

#[cfg(test)]
mod tests;

pub use types::{
    ArpeggioPattern, NoteEvent, PlaybackOptions, PlaybackSink, PlaybackStyle, Schedule, StrumDirection,
};
pub use voicing::{chord_voicing, filtered_voicing, fretted_voicing, simple_voicing};
pub use engine::{arpeggio_order, schedule_chord, schedule_progression, STRUM_DELAY};

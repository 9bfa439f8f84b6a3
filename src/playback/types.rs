//! Playback type definitions
//!
//! The engine produces a flat list of timed note events. Scheduling them on a
//! clock, synthesising sound and cancelling in-flight notes all belong to the
//! [`PlaybackSink`] that consumes the list.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FretError;
use crate::pitch::AbsolutePitch;
use crate::scale::fold_key;

/// How the notes of one chord are spread in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackStyle {
    /// All notes together.
    #[default]
    Harmony,
    /// Notes in quick succession, one per string.
    Strum,
    /// Notes spread evenly over the chord's duration.
    Arpeggio,
}

impl FromStr for PlaybackStyle {
    type Err = FretError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match fold_key(s).as_str() {
            "harmony" => Ok(PlaybackStyle::Harmony),
            "strum" => Ok(PlaybackStyle::Strum),
            "arpeggio" => Ok(PlaybackStyle::Arpeggio),
            _ => Err(FretError::InvalidPlaybackStyle(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrumDirection {
    /// Low to high: pitch order for simple and filtered voicings, lowest
    /// string first for fretted ones.
    #[default]
    Down,
    Up,
}

impl FromStr for StrumDirection {
    type Err = FretError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match fold_key(s).as_str() {
            "down" => Ok(StrumDirection::Down),
            "up" => Ok(StrumDirection::Up),
            _ => Err(FretError::InvalidPlaybackStyle(format!("strum direction {}", s))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArpeggioPattern {
    #[default]
    Ascending,
    Descending,
    /// Up then back down without repeating the top and bottom notes.
    Alternating,
}

impl FromStr for ArpeggioPattern {
    type Err = FretError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match fold_key(s).as_str() {
            "ascending" | "up" => Ok(ArpeggioPattern::Ascending),
            "descending" | "down" => Ok(ArpeggioPattern::Descending),
            "alternating" | "updown" => Ok(ArpeggioPattern::Alternating),
            _ => Err(FretError::InvalidPlaybackStyle(format!("arpeggio pattern {}", s))),
        }
    }
}

/// Playback settings.
///
/// # Fields
/// - `style`: harmony, strum or arpeggio
/// - `direction`: strum direction (ignored by other styles)
/// - `pattern`: arpeggio order (ignored by other styles)
/// - `chord_duration`: seconds each chord occupies in a progression
/// - `fretted`: voice unfiltered chords from the fretboard instead of the
///   root-position voicing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlaybackOptions {
    pub style: PlaybackStyle,
    pub direction: StrumDirection,
    pub pattern: ArpeggioPattern,
    pub chord_duration: f64,
    pub fretted: bool,
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        Self {
            style: PlaybackStyle::Harmony,
            direction: StrumDirection::Down,
            pattern: ArpeggioPattern::Ascending,
            chord_duration: 2.0,
            fretted: false,
        }
    }
}

/// One note to trigger.
///
/// # Fields
/// - `note`: octave-qualified pitch, e.g. E2
/// - `name`: the same pitch as a note identifier string ("E2")
/// - `midi`: MIDI note number for sampled backends
/// - `frequency`: Hz, for oscillator backends
/// - `start`: seconds from the start of playback
/// - `duration`: seconds the note sounds
/// - `velocity`: 0.0 to 1.0
/// - `chord_index`: which chord of the progression produced the note
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteEvent {
    pub note: AbsolutePitch,
    pub name: String,
    pub midi: u8,
    pub frequency: f64,
    pub start: f64,
    pub duration: f64,
    pub velocity: f32,
    pub chord_index: usize,
}

impl NoteEvent {
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

/// Everything a sink needs to play a chord or progression.
///
/// # Fields
/// - `program`: General MIDI program of the instrument
/// - `events`: notes sorted by start time
/// - `total_duration`: seconds until the last chord slot ends
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub program: u8,
    pub events: Vec<NoteEvent>,
    pub total_duration: f64,
}

impl Schedule {
    /// Hand every event to `sink` in start order.
    pub fn play_into(&self, sink: &mut dyn PlaybackSink) {
        for event in &self.events {
            sink.play_event(event);
        }
    }

    /// Events belonging to chord `index`.
    pub fn chord_events(&self, index: usize) -> impl Iterator<Item = &NoteEvent> {
        self.events.iter().filter(move |event| event.chord_index == index)
    }
}

/// Audio backend boundary.
///
/// Implementations schedule each event against their own clock. `stop_all`
/// must silence everything already handed over and be safe to call repeatedly.
pub trait PlaybackSink {
    fn play_event(&mut self, event: &NoteEvent);
    fn stop_all(&mut self);
}

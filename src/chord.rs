//! # Chord Theory
//!
//! Chord-type interval tables, chord-tone derivation, interval labels
//! (R, 3/b3, 5/b5/#5, 7/b7), the mode menu each chord type offers, and the
//! [`Chord`] value the renderers and playback consume.
//!
//! ## Example
//! ```rust
//! use fretwise::{chord, ChordType, PitchClass};
//!
//! let notes = chord::notes_of(PitchClass::A, ChordType::Minor);
//! assert_eq!(notes, vec![PitchClass::A, PitchClass::C, PitchClass::E]);
//!
//! let label = chord::interval_label(PitchClass::A, PitchClass::C, ChordType::Minor);
//! assert_eq!(label.map(|l| l.to_string()), Some("b3".to_string()));
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::classify::{self, ClassifyContext, View};
use crate::error::FretError;
use crate::fretmap::{FretMap, FretPosition, MAX_FRETS};
use crate::pitch::PitchClass;
use crate::scale::{fold_key, ScaleType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChordType {
    Major,
    Minor,
    Dominant7,
    Major7,
    Minor7,
    Diminished,
    Augmented,
}

impl ChordType {
    pub const ALL: [ChordType; 7] = [
        ChordType::Major,
        ChordType::Minor,
        ChordType::Dominant7,
        ChordType::Major7,
        ChordType::Minor7,
        ChordType::Diminished,
        ChordType::Augmented,
    ];

    /// Semitone offsets from the root. Index 1 is always the third, index 2 the
    /// fifth and index 3 the seventh.
    pub fn intervals(self) -> &'static [u8] {
        match self {
            ChordType::Major => &[0, 4, 7],
            ChordType::Minor => &[0, 3, 7],
            ChordType::Dominant7 => &[0, 4, 7, 10],
            ChordType::Major7 => &[0, 4, 7, 11],
            ChordType::Minor7 => &[0, 3, 7, 10],
            ChordType::Diminished => &[0, 3, 6],
            ChordType::Augmented => &[0, 4, 8],
        }
    }

    /// Scales that fit this chord. The first entry is the default mode.
    pub fn valid_modes(self) -> &'static [ScaleType] {
        use ScaleType::*;
        match self {
            ChordType::Major => &[Ionian, Lydian, Mixolydian],
            ChordType::Minor => &[Aeolian, Dorian, Phrygian],
            ChordType::Dominant7 => &[Mixolydian, LydianDominant, Altered],
            ChordType::Major7 => &[Ionian, Lydian],
            ChordType::Minor7 => &[Aeolian, Dorian, Phrygian],
            ChordType::Diminished => &[WholeHalfDiminished, Locrian],
            ChordType::Augmented => &[WholeTone, LydianAugmented],
        }
    }

    pub fn default_mode(self) -> ScaleType {
        self.valid_modes()[0]
    }

    pub fn key(self) -> &'static str {
        match self {
            ChordType::Major => "major",
            ChordType::Minor => "minor",
            ChordType::Dominant7 => "dominant7",
            ChordType::Major7 => "major7",
            ChordType::Minor7 => "minor7",
            ChordType::Diminished => "diminished",
            ChordType::Augmented => "augmented",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ChordType::Major => "Major",
            ChordType::Minor => "Minor",
            ChordType::Dominant7 => "Dom 7",
            ChordType::Major7 => "Maj 7",
            ChordType::Minor7 => "Min 7",
            ChordType::Diminished => "Dim",
            ChordType::Augmented => "Aug",
        }
    }

    /// Suffix appended to the root in a chord symbol ("m7" in "Dm7").
    pub fn symbol(self) -> &'static str {
        match self {
            ChordType::Major => "",
            ChordType::Minor => "m",
            ChordType::Dominant7 => "7",
            ChordType::Major7 => "maj7",
            ChordType::Minor7 => "m7",
            ChordType::Diminished => "dim",
            ChordType::Augmented => "aug",
        }
    }
}

impl fmt::Display for ChordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ChordType {
    type Err = FretError;

    /// Accepts the table keys ("dominant7") and the usual symbol suffixes
    /// ("7", "m7", "maj7", "dim", "aug").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let by_symbol = match s.trim() {
            "" | "M" | "maj" => Some(ChordType::Major),
            "m" | "min" | "-" => Some(ChordType::Minor),
            "7" | "dom7" => Some(ChordType::Dominant7),
            "maj7" | "M7" => Some(ChordType::Major7),
            "m7" | "min7" | "-7" => Some(ChordType::Minor7),
            "dim" | "°" => Some(ChordType::Diminished),
            "aug" | "+" => Some(ChordType::Augmented),
            _ => None,
        };
        if let Some(chord_type) = by_symbol {
            return Ok(chord_type);
        }

        let wanted = fold_key(s);
        Self::ALL
            .into_iter()
            .find(|chord_type| chord_type.key() == wanted)
            .ok_or_else(|| FretError::UnknownChordType(s.to_string()))
    }
}

/// Interval name of a chord tone relative to the chord root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum IntervalLabel {
    #[serde(rename = "R")]
    Root,
    #[serde(rename = "3")]
    MajorThird,
    #[serde(rename = "b3")]
    MinorThird,
    #[serde(rename = "5")]
    Fifth,
    #[serde(rename = "b5")]
    FlatFifth,
    #[serde(rename = "#5")]
    SharpFifth,
    #[serde(rename = "7")]
    Seventh,
    #[serde(rename = "b7")]
    FlatSeventh,
}

impl IntervalLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            IntervalLabel::Root => "R",
            IntervalLabel::MajorThird => "3",
            IntervalLabel::MinorThird => "b3",
            IntervalLabel::Fifth => "5",
            IntervalLabel::FlatFifth => "b5",
            IntervalLabel::SharpFifth => "#5",
            IntervalLabel::Seventh => "7",
            IntervalLabel::FlatSeventh => "b7",
        }
    }
}

impl fmt::Display for IntervalLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every note of `chord_type` built on `root`; index 0 is the root.
pub fn notes_of(root: PitchClass, chord_type: ChordType) -> Vec<PitchClass> {
    chord_type
        .intervals()
        .iter()
        .map(|&interval| root.transpose(interval as i32))
        .collect()
}

/// Whether `target` is a chord tone of `chord_type` on `root`.
pub fn contains(root: PitchClass, target: PitchClass, chord_type: ChordType) -> bool {
    notes_of(root, chord_type).contains(&target)
}

/// Label for `target` as a tone of `chord_type` on `root`, or `None` when the
/// note is not a chord tone.
///
/// The label comes from the note's position in the interval set, refined by the
/// exact interval: a third of 3 semitones is `b3`, a fifth of 6 is `b5`, of 8 is
/// `#5`, a seventh of 10 is `b7`.
pub fn interval_label(root: PitchClass, target: PitchClass, chord_type: ChordType) -> Option<IntervalLabel> {
    let interval = root.interval_to(target);
    let position = chord_type.intervals().iter().position(|&i| i == interval)?;

    let label = match (position, interval) {
        (0, _) => IntervalLabel::Root,
        (1, 3) => IntervalLabel::MinorThird,
        (1, _) => IntervalLabel::MajorThird,
        (2, 6) => IntervalLabel::FlatFifth,
        (2, 8) => IntervalLabel::SharpFifth,
        (2, _) => IntervalLabel::Fifth,
        (_, 10) => IntervalLabel::FlatSeventh,
        (_, _) => IntervalLabel::Seventh,
    };
    Some(label)
}

/// Which fretboard positions a chord displays.
///
/// `Unfiltered` shows every valid position; `Filtered` shows only the listed
/// positions, and an empty set shows nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "kind", content = "positions", rename_all = "camelCase")]
pub enum PositionFilter {
    #[default]
    Unfiltered,
    Filtered(BTreeSet<FretPosition>),
}

impl PositionFilter {
    /// Whether the filter lets `position` through.
    pub fn allows(&self, position: FretPosition) -> bool {
        match self {
            PositionFilter::Unfiltered => true,
            PositionFilter::Filtered(positions) => positions.contains(&position),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, PositionFilter::Filtered(_))
    }
}

/// A chord as shown on one fretboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chord {
    pub root: PitchClass,
    #[serde(rename = "type")]
    pub chord_type: ChordType,
    pub mode: ScaleType,
    /// Roman numeral, present on chords produced by a progression.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeral: Option<String>,
    /// Progression string the chord was expanded from; absent on placeholder chords.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progression_name: Option<String>,
    pub filter: PositionFilter,
    pub is_filtering: bool,
}

impl Chord {
    /// A chord in its type's default mode.
    pub fn new(root: PitchClass, chord_type: ChordType) -> Self {
        Self {
            root,
            chord_type,
            mode: chord_type.default_mode(),
            numeral: None,
            progression_name: None,
            filter: PositionFilter::Unfiltered,
            is_filtering: false,
        }
    }

    /// Same chord in another mode; the mode must be on the type's menu.
    pub fn with_mode(mut self, mode: ScaleType) -> Result<Self, FretError> {
        self.set_mode(mode)?;
        Ok(self)
    }

    pub fn set_root(&mut self, root: PitchClass) {
        self.root = root;
    }

    /// Change the chord type, resetting the mode to the new type's default when
    /// the current mode is not on its menu.
    pub fn set_type(&mut self, chord_type: ChordType) {
        self.chord_type = chord_type;
        if !chord_type.valid_modes().contains(&self.mode) {
            self.mode = chord_type.default_mode();
        }
    }

    pub fn set_mode(&mut self, mode: ScaleType) -> Result<(), FretError> {
        if !self.chord_type.valid_modes().contains(&mode) {
            return Err(FretError::InvalidChord(format!(
                "{} is not a mode offered for {} chords",
                mode,
                self.chord_type.key()
            )));
        }
        self.mode = mode;
        Ok(())
    }

    /// Check the chord can be drawn on `fret_map`: its mode must be on the
    /// type's menu and every filtered position must lie on the board.
    pub fn validate(&self, fret_map: &FretMap) -> Result<(), FretError> {
        if !self.chord_type.valid_modes().contains(&self.mode) {
            return Err(FretError::InvalidChord(format!(
                "{} is not a mode offered for {} chords",
                self.mode,
                self.chord_type.key()
            )));
        }
        if let PositionFilter::Filtered(positions) = &self.filter {
            if let Some(stray) = positions
                .iter()
                .find(|p| p.string >= fret_map.string_count() || p.fret > MAX_FRETS)
            {
                return Err(FretError::InvalidChord(format!(
                    "filtered position {} is not on a {}-string fretboard",
                    stray,
                    fret_map.string_count()
                )));
            }
        }
        Ok(())
    }

    /// Chord symbol such as "Dm7" or "F#aug".
    pub fn symbol(&self) -> String {
        format!("{}{}", self.root, self.chord_type.symbol())
    }

    /// Display title, e.g. "ii - Dm7 (Dorian)".
    pub fn title(&self) -> String {
        match &self.numeral {
            Some(numeral) => format!("{} - {} ({})", numeral, self.symbol(), self.mode),
            None => format!("{} ({})", self.symbol(), self.mode),
        }
    }

    pub fn view(&self) -> View {
        if self.is_filtering {
            View::Editing
        } else {
            View::Normal
        }
    }

    /// Enter filter editing. A chord without a filter is seeded with every
    /// currently valid position so editing starts from what is on screen.
    pub fn begin_filtering(&mut self, fret_map: &FretMap, context: &ClassifyContext) {
        if !self.filter.is_active() {
            let valid = classify::valid_positions(fret_map, self, context);
            self.filter = PositionFilter::Filtered(valid);
        }
        self.is_filtering = true;
    }

    pub fn end_filtering(&mut self) {
        self.is_filtering = false;
    }

    /// Add or remove one position from the filter. Returns whether the position
    /// is shown afterwards. Toggling an unfiltered chord starts an empty filter.
    pub fn toggle_position(&mut self, position: FretPosition) -> bool {
        if !self.filter.is_active() {
            self.filter = PositionFilter::Filtered(BTreeSet::new());
        }
        let PositionFilter::Filtered(positions) = &mut self.filter else {
            return false;
        };
        if positions.remove(&position) {
            false
        } else {
            positions.insert(position);
            true
        }
    }

    /// Drop the filter and leave editing.
    pub fn clear_filter(&mut self) {
        self.filter = PositionFilter::Unfiltered;
        self.is_filtering = false;
    }
}

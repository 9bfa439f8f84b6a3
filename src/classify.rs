//! # Position Classifier
//!
//! Decides what every fretboard cell shows for a chord. The live fretboard,
//! the export renderer and filter seeding all go through [`classify`], so a
//! position is categorised the same way wherever it is drawn.
//!
//! ## Precedence
//! Root > LeadingTone > ChordTone > ScaleTone > Hidden.
//!
//! ## Validity
//! A position is shown when it is a chord tone, or a scale tone outside the
//! chord while scale notes are enabled, or the leading tone while leading notes
//! are enabled. An active position filter narrows that set further in the
//! normal view; it never adds positions.
//!
//! ## Example
//! ```rust
//! use fretwise::{classify, Chord, ChordType, ClassifyContext, FretMap, FretPosition, PitchClass, PositionCategory};
//!
//! let map = FretMap::default();
//! let chord = Chord::new(PitchClass::E, ChordType::Minor);
//! let context = ClassifyContext::default();
//!
//! let open_high_e = classify(&map, &chord, FretPosition::new(0, 0), &context)?;
//! assert_eq!(open_high_e, PositionCategory::Root);
//! # Ok::<(), fretwise::FretError>(())
//! ```

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::chord::{self, Chord, IntervalLabel};
use crate::error::FretError;
use crate::fretmap::{FretMap, FretPosition};
use crate::pitch::PitchClass;
use crate::scale;

/// What a fretboard position displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "label", rename_all = "camelCase")]
pub enum PositionCategory {
    Root,
    ChordTone(IntervalLabel),
    /// 1-indexed scale degree.
    ScaleTone(u8),
    LeadingTone,
    Hidden,
}

impl PositionCategory {
    /// Marker text: "R", an interval such as "b3", a scale degree, or "L".
    pub fn label(&self) -> Option<String> {
        match self {
            PositionCategory::Root => Some("R".to_string()),
            PositionCategory::ChordTone(interval) => Some(interval.to_string()),
            PositionCategory::ScaleTone(degree) => Some(degree.to_string()),
            PositionCategory::LeadingTone => Some("L".to_string()),
            PositionCategory::Hidden => None,
        }
    }

    pub fn is_visible(&self) -> bool {
        !matches!(self, PositionCategory::Hidden)
    }
}

/// Display toggles and progression context for one chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyContext {
    /// Root of the following chord in a progression.
    pub next_chord_root: Option<PitchClass>,
    pub show_leading_notes: bool,
    pub show_scale_notes: bool,
}

impl Default for ClassifyContext {
    fn default() -> Self {
        Self {
            next_chord_root: None,
            show_leading_notes: false,
            show_scale_notes: true,
        }
    }
}

impl ClassifyContext {
    /// One semitone below the next chord's root, when leading notes are shown
    /// and a next chord exists.
    pub fn leading_tone(&self) -> Option<PitchClass> {
        if !self.show_leading_notes {
            return None;
        }
        self.next_chord_root.map(|root| root.transpose(-1))
    }
}

/// Whether the user is editing the chord's position filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum View {
    /// The filter, when present, hides positions outside it.
    Normal,
    /// Every valid position is shown so the filter can be edited.
    Editing,
}

struct Evaluation {
    note: PitchClass,
    is_root: bool,
    is_chord_tone: bool,
    is_scale_tone: bool,
    is_leading_tone: bool,
    valid: bool,
}

fn evaluate(
    fret_map: &FretMap,
    chord: &Chord,
    position: FretPosition,
    context: &ClassifyContext,
) -> Result<Evaluation, FretError> {
    let note = fret_map.pitch_at_position(position)?;

    let is_root = note == chord.root;
    let is_chord_tone = chord::contains(chord.root, note, chord.chord_type);
    let is_scale_tone = scale::contains(chord.root, note, chord.mode);
    let is_leading_tone = context.leading_tone() == Some(note);

    let show_scale = context.show_scale_notes && is_scale_tone && !is_chord_tone;
    let valid = fret_map.is_primary_string(position.string) && (is_chord_tone || show_scale || is_leading_tone);

    Ok(Evaluation {
        note,
        is_root,
        is_chord_tone,
        is_scale_tone,
        is_leading_tone,
        valid,
    })
}

/// Classify one position for `chord`, honouring the chord's filter when it is
/// not being edited.
pub fn classify(
    fret_map: &FretMap,
    chord: &Chord,
    position: FretPosition,
    context: &ClassifyContext,
) -> Result<PositionCategory, FretError> {
    let eval = evaluate(fret_map, chord, position, context)?;

    if !eval.valid {
        return Ok(PositionCategory::Hidden);
    }
    if chord.view() == View::Normal && !chord.filter.allows(position) {
        return Ok(PositionCategory::Hidden);
    }

    let category = if eval.is_root {
        PositionCategory::Root
    } else if eval.is_leading_tone {
        PositionCategory::LeadingTone
    } else if eval.is_chord_tone {
        match chord::interval_label(chord.root, eval.note, chord.chord_type) {
            Some(label) => PositionCategory::ChordTone(label),
            None => PositionCategory::Hidden,
        }
    } else if eval.is_scale_tone {
        match scale::degree_label(chord.root, eval.note, chord.mode) {
            Some(degree) => PositionCategory::ScaleTone(degree),
            None => PositionCategory::Hidden,
        }
    } else {
        PositionCategory::Hidden
    };
    Ok(category)
}

/// Every position that would be shown with no filter applied.
pub fn valid_positions(fret_map: &FretMap, chord: &Chord, context: &ClassifyContext) -> BTreeSet<FretPosition> {
    fret_map
        .positions()
        .filter(|&position| {
            evaluate(fret_map, chord, position, context)
                .map(|eval| eval.valid)
                .unwrap_or(false)
        })
        .collect()
}

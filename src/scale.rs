//! # Scale Theory
//!
//! Scale and mode interval tables, scale-tone derivation and scale-degree
//! labels (1-indexed position in the interval set).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FretError;
use crate::pitch::PitchClass;

/// Scales and modes offered for the chord types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScaleType {
    Ionian,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Aeolian,
    Locrian,
    LydianDominant,
    Altered,
    WholeHalfDiminished,
    WholeTone,
    LydianAugmented,
}

impl ScaleType {
    pub const ALL: [ScaleType; 12] = [
        ScaleType::Ionian,
        ScaleType::Dorian,
        ScaleType::Phrygian,
        ScaleType::Lydian,
        ScaleType::Mixolydian,
        ScaleType::Aeolian,
        ScaleType::Locrian,
        ScaleType::LydianDominant,
        ScaleType::Altered,
        ScaleType::WholeHalfDiminished,
        ScaleType::WholeTone,
        ScaleType::LydianAugmented,
    ];

    /// Semitone offsets from the root, in degree order.
    pub fn intervals(self) -> &'static [u8] {
        match self {
            ScaleType::Ionian => &[0, 2, 4, 5, 7, 9, 11],
            ScaleType::Dorian => &[0, 2, 3, 5, 7, 9, 10],
            ScaleType::Phrygian => &[0, 1, 3, 5, 7, 8, 10],
            ScaleType::Lydian => &[0, 2, 4, 6, 7, 9, 11],
            ScaleType::Mixolydian => &[0, 2, 4, 5, 7, 9, 10],
            ScaleType::Aeolian => &[0, 2, 3, 5, 7, 8, 10],
            ScaleType::Locrian => &[0, 1, 3, 5, 6, 8, 10],
            ScaleType::LydianDominant => &[0, 2, 4, 6, 7, 9, 10],
            // Super Locrian
            ScaleType::Altered => &[0, 1, 3, 4, 6, 8, 10],
            ScaleType::WholeHalfDiminished => &[0, 2, 3, 5, 6, 8, 9, 11],
            ScaleType::WholeTone => &[0, 2, 4, 6, 8, 10],
            ScaleType::LydianAugmented => &[0, 2, 4, 6, 8, 9, 11],
        }
    }

    /// Key used in settings files and the wasm bridge.
    pub fn key(self) -> &'static str {
        match self {
            ScaleType::Ionian => "ionian",
            ScaleType::Dorian => "dorian",
            ScaleType::Phrygian => "phrygian",
            ScaleType::Lydian => "lydian",
            ScaleType::Mixolydian => "mixolydian",
            ScaleType::Aeolian => "aeolian",
            ScaleType::Locrian => "locrian",
            ScaleType::LydianDominant => "lydianDominant",
            ScaleType::Altered => "altered",
            ScaleType::WholeHalfDiminished => "wholeHalfDiminished",
            ScaleType::WholeTone => "wholeTone",
            ScaleType::LydianAugmented => "lydianAugmented",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScaleType::Ionian => "Ionian",
            ScaleType::Dorian => "Dorian",
            ScaleType::Phrygian => "Phrygian",
            ScaleType::Lydian => "Lydian",
            ScaleType::Mixolydian => "Mixolydian",
            ScaleType::Aeolian => "Aeolian",
            ScaleType::Locrian => "Locrian",
            ScaleType::LydianDominant => "Lydian Dominant",
            ScaleType::Altered => "Altered",
            ScaleType::WholeHalfDiminished => "Whole-Half Diminished",
            ScaleType::WholeTone => "Whole Tone",
            ScaleType::LydianAugmented => "Lydian Augmented",
        }
    }
}

impl fmt::Display for ScaleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ScaleType {
    type Err = FretError;

    /// Matches the camelCase key, case-insensitively, with `-`/`_`/spaces ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = fold_key(s);
        Self::ALL
            .into_iter()
            .find(|scale| fold_key(scale.key()) == wanted)
            .ok_or_else(|| FretError::UnknownScaleType(s.to_string()))
    }
}

pub(crate) fn fold_key(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Every note of `scale` built on `root`, in degree order.
pub fn notes_of(root: PitchClass, scale: ScaleType) -> Vec<PitchClass> {
    scale
        .intervals()
        .iter()
        .map(|&interval| root.transpose(interval as i32))
        .collect()
}

/// 1-indexed scale degree of `target` in `scale` on `root`, or `None` when the
/// note is outside the scale.
pub fn degree_label(root: PitchClass, target: PitchClass, scale: ScaleType) -> Option<u8> {
    let interval = root.interval_to(target);
    scale
        .intervals()
        .iter()
        .position(|&i| i == interval)
        .map(|position| position as u8 + 1)
}

/// Whether `target` belongs to `scale` on `root`.
pub fn contains(root: PitchClass, target: PitchClass, scale: ScaleType) -> bool {
    notes_of(root, scale).contains(&target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use PitchClass::*;

    #[test]
    fn test_a_aeolian() {
        assert_eq!(notes_of(A, ScaleType::Aeolian), vec![A, B, C, D, E, F, G]);
    }

    #[test]
    fn test_scale_sizes() {
        assert_eq!(ScaleType::WholeTone.intervals().len(), 6);
        assert_eq!(ScaleType::WholeHalfDiminished.intervals().len(), 8);
        for scale in ScaleType::ALL {
            assert_eq!(scale.intervals()[0], 0, "{} must start on the root", scale);
            assert!((6..=8).contains(&scale.intervals().len()));
        }
    }

    #[test]
    fn test_degree_labels() {
        assert_eq!(degree_label(C, C, ScaleType::Ionian), Some(1));
        assert_eq!(degree_label(C, F, ScaleType::Ionian), Some(4));
        assert_eq!(degree_label(C, FSharp, ScaleType::Lydian), Some(4));
        assert_eq!(degree_label(C, FSharp, ScaleType::Ionian), None);
        assert_eq!(degree_label(C, B, ScaleType::WholeHalfDiminished), Some(8));
    }

    #[test]
    fn test_every_scale_note_has_a_degree() {
        for scale in ScaleType::ALL {
            for root in PitchClass::ALL {
                for note in notes_of(root, scale) {
                    assert!(degree_label(root, note, scale).is_some());
                }
            }
        }
    }

    #[test]
    fn test_parse_keys() {
        assert_eq!("lydianDominant".parse::<ScaleType>().unwrap(), ScaleType::LydianDominant);
        assert_eq!("whole-half-diminished".parse::<ScaleType>().unwrap(), ScaleType::WholeHalfDiminished);
        assert_eq!("Aeolian".parse::<ScaleType>().unwrap(), ScaleType::Aeolian);
        assert_eq!(
            "bebop".parse::<ScaleType>(),
            Err(FretError::UnknownScaleType("bebop".to_string()))
        );
    }
}

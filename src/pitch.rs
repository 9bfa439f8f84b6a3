//! # Pitch Space
//!
//! The chromatic note model every other module builds on: twelve equal-tempered
//! pitch classes, enharmonic normalisation (flats parse to their sharp
//! spelling), floored-modulo transposition, and octave-qualified pitches for
//! audio.
//!
//! ## Example
//! ```rust
//! use fretwise::PitchClass;
//!
//! let bb: PitchClass = "Bb".parse()?;
//! assert_eq!(bb, PitchClass::ASharp);
//! assert_eq!(bb.to_string(), "A#");
//! assert_eq!(bb.transpose(3), PitchClass::CSharp);
//! assert_eq!(PitchClass::C.interval_to(PitchClass::A), 9);
//! # Ok::<(), fretwise::FretError>(())
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FretError;

/// One of the twelve pitch classes, always spelled with sharps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum PitchClass {
    C,
    #[serde(rename = "C#")]
    CSharp,
    D,
    #[serde(rename = "D#")]
    DSharp,
    E,
    F,
    #[serde(rename = "F#")]
    FSharp,
    G,
    #[serde(rename = "G#")]
    GSharp,
    A,
    #[serde(rename = "A#")]
    ASharp,
    B,
}

impl PitchClass {
    /// Chromatic order starting from C.
    pub const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::CSharp,
        PitchClass::D,
        PitchClass::DSharp,
        PitchClass::E,
        PitchClass::F,
        PitchClass::FSharp,
        PitchClass::G,
        PitchClass::GSharp,
        PitchClass::A,
        PitchClass::ASharp,
        PitchClass::B,
    ];

    /// Chromatic index, C = 0 through B = 11.
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Pitch class for any integer index, wrapping with floored modulo so
    /// negative indices count down from B.
    pub fn from_index(index: i32) -> Self {
        Self::ALL[index.rem_euclid(12) as usize]
    }

    /// Move up (positive) or down (negative) by any number of semitones.
    pub fn transpose(self, semitones: i32) -> Self {
        Self::from_index(self.index() as i32 + semitones.rem_euclid(12))
    }

    /// Ascending semitone distance from `self` to `target`, always in 0..=11.
    pub fn interval_to(self, target: PitchClass) -> u8 {
        (target.index() as i32 - self.index() as i32).rem_euclid(12) as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            PitchClass::C => "C",
            PitchClass::CSharp => "C#",
            PitchClass::D => "D",
            PitchClass::DSharp => "D#",
            PitchClass::E => "E",
            PitchClass::F => "F",
            PitchClass::FSharp => "F#",
            PitchClass::G => "G",
            PitchClass::GSharp => "G#",
            PitchClass::A => "A",
            PitchClass::ASharp => "A#",
            PitchClass::B => "B",
        }
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PitchClass {
    type Err = FretError;

    /// Accepts a natural letter with at most one `#`/`b` (or `♯`/`♭`).
    /// Spellings such as `E#` or `Cb` resolve arithmetically.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || FretError::InvalidNoteName(s.to_string());
        let mut chars = s.trim().chars();

        let natural: i32 = match chars.next() {
            Some('C') => 0,
            Some('D') => 2,
            Some('E') => 4,
            Some('F') => 5,
            Some('G') => 7,
            Some('A') => 9,
            Some('B') => 11,
            _ => return Err(invalid()),
        };
        let accidental = match chars.next() {
            None => 0,
            Some('#') | Some('♯') => 1,
            Some('b') | Some('♭') => -1,
            Some(_) => return Err(invalid()),
        };
        if chars.next().is_some() {
            return Err(invalid());
        }

        Ok(Self::from_index(natural + accidental))
    }
}

impl TryFrom<String> for PitchClass {
    type Error = FretError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Map a note name to its canonical sharp spelling ("Db" -> "C#").
pub fn normalize(name: &str) -> Result<PitchClass, FretError> {
    name.parse()
}

/// Chromatic index of a note name after normalisation.
pub fn index_of(name: &str) -> Result<u8, FretError> {
    Ok(normalize(name)?.index())
}

/// Whether two spellings name the same pitch class ("C#" and "Db").
pub fn are_equal(a: &str, b: &str) -> Result<bool, FretError> {
    Ok(normalize(a)? == normalize(b)?)
}

/// Transpose a note name by any number of semitones.
pub fn transpose(name: &str, semitones: i32) -> Result<PitchClass, FretError> {
    Ok(normalize(name)?.transpose(semitones))
}

/// An octave-qualified pitch such as E2, the identifier audio backends trigger.
///
/// Octave numbering follows scientific pitch notation: C4 is middle C (MIDI 60).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AbsolutePitch {
    pub pitch: PitchClass,
    pub octave: i8,
}

impl AbsolutePitch {
    pub fn new(pitch: PitchClass, octave: i8) -> Self {
        Self { pitch, octave }
    }

    /// Build from a MIDI note number.
    pub fn from_midi(midi: u8) -> Self {
        Self {
            pitch: PitchClass::from_index(midi as i32),
            octave: (midi / 12) as i8 - 1,
        }
    }

    /// MIDI note number: C4 = 60, E2 = 40.
    pub fn midi(self) -> i32 {
        (self.octave as i32 + 1) * 12 + self.pitch.index() as i32
    }

    /// Equal-tempered frequency in Hz with A4 = 440 Hz.
    pub fn frequency(self) -> f64 {
        440.0 * 2f64.powf((self.midi() - 69) as f64 / 12.0)
    }

    /// Move by semitones, carrying across octave boundaries.
    pub fn transpose(self, semitones: i32) -> Self {
        let midi = self.midi() + semitones;
        Self {
            pitch: PitchClass::from_index(midi),
            octave: (midi.div_euclid(12) - 1) as i8,
        }
    }
}

impl fmt::Display for AbsolutePitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.pitch, self.octave)
    }
}

impl FromStr for AbsolutePitch {
    type Err = FretError;

    /// Parses "E2", "Bb3" or "C#" (octave 4 when omitted).
    ///
    /// Unrecognised names are an error rather than a fallback to middle C.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let split = trimmed
            .find(|c: char| c.is_ascii_digit() || c == '-')
            .unwrap_or(trimmed.len());
        let (name, octave) = trimmed.split_at(split);

        let pitch = name
            .parse::<PitchClass>()
            .map_err(|_| FretError::InvalidNoteName(s.to_string()))?;
        let octave = if octave.is_empty() {
            4
        } else {
            octave
                .parse::<i8>()
                .map_err(|_| FretError::InvalidNoteName(s.to_string()))?
        };

        Ok(Self { pitch, octave })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flats_normalize_to_sharps() {
        assert_eq!(normalize("Db").unwrap(), PitchClass::CSharp);
        assert_eq!(normalize("Eb").unwrap(), PitchClass::DSharp);
        assert_eq!(normalize("Gb").unwrap(), PitchClass::FSharp);
        assert_eq!(normalize("Ab").unwrap(), PitchClass::GSharp);
        assert_eq!(normalize("Bb").unwrap(), PitchClass::ASharp);
        assert_eq!(normalize("F#").unwrap(), PitchClass::FSharp);
        assert_eq!(normalize("E").unwrap(), PitchClass::E);
    }

    #[test]
    fn test_edge_spellings_resolve_arithmetically() {
        assert_eq!(normalize("Cb").unwrap(), PitchClass::B);
        assert_eq!(normalize("E#").unwrap(), PitchClass::F);
        assert_eq!(normalize("B#").unwrap(), PitchClass::C);
    }

    #[test]
    fn test_invalid_names_rejected() {
        for bad in ["", "H", "c", "C##", "Cx", "Bbb", "X#", "C4"] {
            assert_eq!(
                normalize(bad),
                Err(FretError::InvalidNoteName(bad.to_string())),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_index_and_equality() {
        assert_eq!(index_of("C").unwrap(), 0);
        assert_eq!(index_of("Bb").unwrap(), 10);
        assert_eq!(index_of("B").unwrap(), 11);
        assert!(are_equal("C#", "Db").unwrap());
        assert!(!are_equal("C", "D").unwrap());
    }

    #[test]
    fn test_from_index_uses_floored_modulo() {
        assert_eq!(PitchClass::from_index(-1), PitchClass::B);
        assert_eq!(PitchClass::from_index(-13), PitchClass::B);
        assert_eq!(PitchClass::from_index(12), PitchClass::C);
        assert_eq!(PitchClass::from_index(25), PitchClass::CSharp);
    }

    #[test]
    fn test_octave_periodicity() {
        for pitch in PitchClass::ALL {
            for k in -3..=3 {
                assert_eq!(PitchClass::from_index(pitch.index() as i32 + 12 * k), pitch);
            }
        }
    }

    #[test]
    fn test_transpose_round_trip() {
        for pitch in PitchClass::ALL {
            for k in -25..=25 {
                assert_eq!(pitch.transpose(k).transpose(-k), pitch);
            }
        }
        assert_eq!(transpose("G", -1).unwrap(), PitchClass::FSharp);
    }

    #[test]
    fn test_transpose_extreme_offsets() {
        for pitch in PitchClass::ALL {
            assert_eq!(pitch.transpose(i32::MAX).transpose(-i32::MAX), pitch);
            assert_eq!(pitch.transpose(i32::MIN + 1).transpose(i32::MAX), pitch);
        }
        // i32::MAX is 7 mod 12, i32::MIN is 4 mod 12.
        assert_eq!(PitchClass::B.transpose(i32::MAX), PitchClass::FSharp);
        assert_eq!(PitchClass::B.transpose(i32::MIN), PitchClass::DSharp);
    }

    #[test]
    fn test_interval_is_non_negative() {
        assert_eq!(PitchClass::C.interval_to(PitchClass::E), 4);
        assert_eq!(PitchClass::A.interval_to(PitchClass::C), 3);
        assert_eq!(PitchClass::E.interval_to(PitchClass::E), 0);
        assert_eq!(PitchClass::B.interval_to(PitchClass::C), 1);
    }

    #[test]
    fn test_absolute_pitch_midi() {
        assert_eq!(AbsolutePitch::new(PitchClass::C, 4).midi(), 60);
        assert_eq!(AbsolutePitch::new(PitchClass::E, 2).midi(), 40);
        assert_eq!(AbsolutePitch::new(PitchClass::A, 4).frequency(), 440.0);
        assert_eq!(AbsolutePitch::from_midi(40), AbsolutePitch::new(PitchClass::E, 2));
        assert_eq!(
            AbsolutePitch::new(PitchClass::B, 3).transpose(1),
            AbsolutePitch::new(PitchClass::C, 4)
        );
    }

    #[test]
    fn test_absolute_pitch_parsing() {
        assert_eq!("E2".parse::<AbsolutePitch>().unwrap().to_string(), "E2");
        assert_eq!("Bb3".parse::<AbsolutePitch>().unwrap().midi(), 58);
        assert_eq!("C".parse::<AbsolutePitch>().unwrap().midi(), 60);
        assert!("Q4".parse::<AbsolutePitch>().is_err());
        assert!("C4x".parse::<AbsolutePitch>().is_err());
    }

    #[test]
    fn test_serializes_with_sharp_names() {
        assert_eq!(serde_json::to_string(&PitchClass::CSharp).unwrap(), "\"C#\"");
        let parsed: PitchClass = serde_json::from_str("\"Eb\"").unwrap();
        assert_eq!(parsed, PitchClass::DSharp);
    }
}

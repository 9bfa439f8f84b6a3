//! # Instruments and Tunings
//!
//! Open-string tunings, indexed from the highest-pitched string (index 0) to the
//! lowest, each with a parallel table of base octaves that anchors fret pitches
//! into absolute pitches for playback.
//!
//! Reentrant tunings (ukulele, banjo) keep the same ordinal scheme even though
//! their physical pitch order is not monotonic. Mandolin strings come in
//! unison pairs: odd indices double the even index before them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FretError;
use crate::pitch::PitchClass;
use crate::scale::fold_key;

use PitchClass::*;

/// Supported fretted instruments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Instrument {
    #[default]
    Guitar,
    Bass4,
    Bass5,
    Bass6,
    Ukulele,
    Mandolin,
    Banjo,
}

impl Instrument {
    pub const ALL: [Instrument; 7] = [
        Instrument::Guitar,
        Instrument::Bass4,
        Instrument::Bass5,
        Instrument::Bass6,
        Instrument::Ukulele,
        Instrument::Mandolin,
        Instrument::Banjo,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Instrument::Guitar => "guitar",
            Instrument::Bass4 => "bass4",
            Instrument::Bass5 => "bass5",
            Instrument::Bass6 => "bass6",
            Instrument::Ukulele => "ukulele",
            Instrument::Mandolin => "mandolin",
            Instrument::Banjo => "banjo",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Instrument::Guitar => "Guitar",
            Instrument::Bass4 => "4-String Bass",
            Instrument::Bass5 => "5-String Bass",
            Instrument::Bass6 => "6-String Bass",
            Instrument::Ukulele => "Ukulele",
            Instrument::Mandolin => "Mandolin",
            Instrument::Banjo => "Banjo",
        }
    }

    /// General MIDI program for sampled playback backends.
    pub fn midi_program(self) -> u8 {
        match self {
            Instrument::Guitar | Instrument::Ukulele => 24,
            Instrument::Bass4 | Instrument::Bass5 | Instrument::Bass6 => 33,
            Instrument::Mandolin | Instrument::Banjo => 105,
        }
    }

    /// Tuning for this instrument. `guitar_tuning` only applies to the guitar.
    pub fn tuning(self, guitar_tuning: GuitarTuning) -> Tuning {
        match self {
            Instrument::Guitar => guitar_tuning.tuning(),
            Instrument::Bass4 => Tuning {
                name: "Bass (G D A E)",
                strings: &[G, D, A, E],
                base_octaves: &[2, 2, 1, 1],
                paired_courses: false,
            },
            Instrument::Bass5 => Tuning {
                name: "5-String Bass (G D A E B)",
                strings: &[G, D, A, E, B],
                base_octaves: &[2, 2, 1, 1, 0],
                paired_courses: false,
            },
            Instrument::Bass6 => Tuning {
                name: "6-String Bass (C G D A E B)",
                strings: &[C, G, D, A, E, B],
                base_octaves: &[3, 2, 2, 1, 1, 0],
                paired_courses: false,
            },
            Instrument::Ukulele => Tuning {
                name: "Ukulele (A E C G)",
                strings: &[A, E, C, G],
                base_octaves: &[4, 4, 4, 3],
                paired_courses: false,
            },
            Instrument::Mandolin => Tuning {
                name: "Mandolin (E A D G)",
                strings: &[E, E, A, A, D, D, G, G],
                base_octaves: &[4, 4, 3, 3, 3, 3, 2, 2],
                paired_courses: true,
            },
            // Index 4 is the short fifth string.
            Instrument::Banjo => Tuning {
                name: "Banjo (D B G D G)",
                strings: &[D, B, G, D, G],
                base_octaves: &[4, 3, 3, 2, 2],
                paired_courses: false,
            },
        }
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Instrument {
    type Err = FretError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = fold_key(s);
        let wanted = if wanted == "bass" { "bass4".to_string() } else { wanted };
        Self::ALL
            .into_iter()
            .find(|instrument| instrument.key() == wanted)
            .ok_or_else(|| FretError::UnknownInstrument(s.to_string()))
    }
}

/// Standard guitar tuning and its alternates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GuitarTuning {
    #[default]
    Standard,
    DropD,
    DropC,
    HalfStepDown,
    FullStepDown,
    OpenG,
    OpenD,
    OpenE,
    Dadgad,
}

impl GuitarTuning {
    pub const ALL: [GuitarTuning; 9] = [
        GuitarTuning::Standard,
        GuitarTuning::DropD,
        GuitarTuning::DropC,
        GuitarTuning::HalfStepDown,
        GuitarTuning::FullStepDown,
        GuitarTuning::OpenG,
        GuitarTuning::OpenD,
        GuitarTuning::OpenE,
        GuitarTuning::Dadgad,
    ];

    pub fn key(self) -> &'static str {
        match self {
            GuitarTuning::Standard => "standard",
            GuitarTuning::DropD => "drop-d",
            GuitarTuning::DropC => "drop-c",
            GuitarTuning::HalfStepDown => "half-step-down",
            GuitarTuning::FullStepDown => "full-step-down",
            GuitarTuning::OpenG => "open-g",
            GuitarTuning::OpenD => "open-d",
            GuitarTuning::OpenE => "open-e",
            GuitarTuning::Dadgad => "dadgad",
        }
    }

    pub fn tuning(self) -> Tuning {
        // Every alternate keeps the standard octave layout.
        const OCTAVES: &[i8] = &[4, 3, 3, 3, 2, 2];
        let (name, strings): (&'static str, &'static [PitchClass]) = match self {
            GuitarTuning::Standard => ("Standard (E A D G B E)", &[E, B, G, D, A, E]),
            GuitarTuning::DropD => ("Drop D (D A D G B E)", &[E, B, G, D, A, D]),
            GuitarTuning::DropC => ("Drop C (C G C F A D)", &[D, A, F, C, G, C]),
            GuitarTuning::HalfStepDown => ("Half Step Down (Eb Ab Db Gb Bb Eb)", &[DSharp, ASharp, FSharp, CSharp, GSharp, DSharp]),
            GuitarTuning::FullStepDown => ("Full Step Down (D G C F A D)", &[D, A, F, C, G, D]),
            GuitarTuning::OpenG => ("Open G (D G D G B D)", &[D, B, G, D, G, D]),
            GuitarTuning::OpenD => ("Open D (D A D F# A D)", &[D, A, FSharp, D, A, D]),
            GuitarTuning::OpenE => ("Open E (E B E G# B E)", &[E, B, GSharp, E, B, E]),
            GuitarTuning::Dadgad => ("DADGAD", &[D, A, G, D, A, D]),
        };
        Tuning {
            name,
            strings,
            base_octaves: OCTAVES,
            paired_courses: false,
        }
    }
}

impl FromStr for GuitarTuning {
    type Err = FretError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = fold_key(s);
        Self::ALL
            .into_iter()
            .find(|tuning| fold_key(tuning.key()) == wanted)
            .ok_or_else(|| FretError::UnknownTuning(s.to_string()))
    }
}

/// Open-string pitches and their octave anchors, highest string first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tuning {
    pub name: &'static str,
    pub strings: &'static [PitchClass],
    pub base_octaves: &'static [i8],
    /// Strings are grouped in pairs; odd indices double the preceding string.
    pub paired_courses: bool,
}

impl Tuning {
    pub fn string_count(&self) -> usize {
        self.strings.len()
    }
}

//! # Progressions
//!
//! Expands roman-numeral progressions ("I-V-vi-IV") into concrete chords in a
//! key. Each numeral carries a fixed scale degree, triad, seventh chord and
//! diatonic mode; the mode does not change when sevenths are requested.
//!
//! ## Example
//! ```rust
//! use fretwise::{progression, ChordType, KeyQuality, PitchClass};
//!
//! let chords = progression::expand("ii-V-I", PitchClass::C, KeyQuality::Major, true);
//! let symbols: Vec<String> = chords.iter().map(|c| c.symbol()).collect();
//! assert_eq!(symbols, vec!["Dm7", "G7", "Cmaj7"]);
//! assert_eq!(chords[1].chord_type, ChordType::Dominant7);
//! ```
//!
//! Unknown numerals are skipped by [`expand`] so partially typed progressions
//! still render; [`expand_strict`] rejects them instead.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::chord::{Chord, ChordType, PositionFilter};
use crate::error::FretError;
use crate::pitch::PitchClass;
use crate::scale::{fold_key, ScaleType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyQuality {
    #[default]
    Major,
    Minor,
}

impl KeyQuality {
    /// Semitone offset of each scale degree (natural minor for minor keys).
    pub fn degree_intervals(self) -> &'static [u8; 7] {
        match self {
            KeyQuality::Major => &[0, 2, 4, 5, 7, 9, 11],
            KeyQuality::Minor => &[0, 2, 3, 5, 7, 8, 10],
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            KeyQuality::Major => "major",
            KeyQuality::Minor => "minor",
        }
    }

    /// Numerals available in this key quality.
    pub fn numerals(self) -> &'static [Numeral] {
        match self {
            KeyQuality::Major => MAJOR_NUMERALS,
            KeyQuality::Minor => MINOR_NUMERALS,
        }
    }
}

impl fmt::Display for KeyQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for KeyQuality {
    type Err = FretError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match fold_key(s).as_str() {
            "major" | "maj" => Ok(KeyQuality::Major),
            "minor" | "min" => Ok(KeyQuality::Minor),
            _ => Err(FretError::UnknownKeyQuality(s.to_string())),
        }
    }
}

/// One entry of the roman-numeral vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Numeral {
    pub symbol: &'static str,
    /// ASCII spelling accepted alongside `symbol` ("viio" for "vii°").
    pub ascii: &'static str,
    /// Scale degree, 0 = tonic.
    pub degree: usize,
    pub triad: ChordType,
    pub seventh: ChordType,
    pub mode: ScaleType,
}

const fn numeral(
    symbol: &'static str,
    ascii: &'static str,
    degree: usize,
    triad: ChordType,
    seventh: ChordType,
    mode: ScaleType,
) -> Numeral {
    Numeral {
        symbol,
        ascii,
        degree,
        triad,
        seventh,
        mode,
    }
}

const MAJOR_NUMERALS: &[Numeral] = &[
    numeral("I", "I", 0, ChordType::Major, ChordType::Major7, ScaleType::Ionian),
    numeral("ii", "ii", 1, ChordType::Minor, ChordType::Minor7, ScaleType::Dorian),
    numeral("iii", "iii", 2, ChordType::Minor, ChordType::Minor7, ScaleType::Phrygian),
    numeral("IV", "IV", 3, ChordType::Major, ChordType::Major7, ScaleType::Lydian),
    numeral("V", "V", 4, ChordType::Major, ChordType::Dominant7, ScaleType::Mixolydian),
    numeral("vi", "vi", 5, ChordType::Minor, ChordType::Minor7, ScaleType::Aeolian),
    numeral("vii°", "viio", 6, ChordType::Diminished, ChordType::Diminished, ScaleType::Locrian),
];

const MINOR_NUMERALS: &[Numeral] = &[
    numeral("i", "i", 0, ChordType::Minor, ChordType::Minor7, ScaleType::Aeolian),
    numeral("ii°", "iio", 1, ChordType::Diminished, ChordType::Diminished, ScaleType::Locrian),
    numeral("III", "III", 2, ChordType::Major, ChordType::Major7, ScaleType::Ionian),
    numeral("iv", "iv", 3, ChordType::Minor, ChordType::Minor7, ScaleType::Dorian),
    numeral("v", "v", 4, ChordType::Minor, ChordType::Minor7, ScaleType::Phrygian),
    numeral("VI", "VI", 5, ChordType::Major, ChordType::Major7, ScaleType::Lydian),
    numeral("VII", "VII", 6, ChordType::Major, ChordType::Dominant7, ScaleType::Mixolydian),
];

/// Look up a numeral in the vocabulary for `quality`.
pub fn lookup(symbol: &str, quality: KeyQuality) -> Option<&'static Numeral> {
    let symbol = symbol.trim();
    quality
        .numerals()
        .iter()
        .find(|numeral| numeral.symbol == symbol || numeral.ascii == symbol)
}

impl Numeral {
    /// Concrete chord for this numeral in `key`.
    pub fn resolve(&self, key: PitchClass, quality: KeyQuality, use_sevenths: bool) -> Chord {
        let root = key.transpose(quality.degree_intervals()[self.degree] as i32);
        Chord {
            root,
            chord_type: if use_sevenths { self.seventh } else { self.triad },
            mode: self.mode,
            numeral: Some(self.symbol.to_string()),
            progression_name: None,
            filter: PositionFilter::Unfiltered,
            is_filtering: false,
        }
    }
}

fn expand_with(
    progression: &str,
    key: PitchClass,
    quality: KeyQuality,
    use_sevenths: bool,
    strict: bool,
) -> Result<Vec<Chord>, FretError> {
    let mut chords = Vec::new();

    for symbol in progression.split('-') {
        let Some(numeral) = lookup(symbol, quality) else {
            if strict {
                return Err(FretError::UnresolvableNumeral {
                    numeral: symbol.trim().to_string(),
                    quality: quality.key().to_string(),
                });
            }
            warn!(numeral = symbol, quality = quality.key(), "skipping unknown numeral");
            continue;
        };

        let mut chord = numeral.resolve(key, quality, use_sevenths);
        chord.progression_name = Some(progression.to_string());
        chords.push(chord);
    }

    debug!(
        progression,
        key = key.name(),
        quality = quality.key(),
        chords = chords.len(),
        "expanded progression"
    );
    Ok(chords)
}

/// Expand a `-`-separated progression, skipping numerals outside the
/// vocabulary. Every chord is tagged with the progression string.
pub fn expand(progression: &str, key: PitchClass, quality: KeyQuality, use_sevenths: bool) -> Vec<Chord> {
    expand_with(progression, key, quality, use_sevenths, false).unwrap_or_default()
}

/// Like [`expand`], but an unknown numeral is an error.
pub fn expand_strict(
    progression: &str,
    key: PitchClass,
    quality: KeyQuality,
    use_sevenths: bool,
) -> Result<Vec<Chord>, FretError> {
    expand_with(progression, key, quality, use_sevenths, true)
}

/// A built-in progression offered in the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    pub name: &'static str,
    pub value: &'static str,
    pub description: &'static str,
    pub quality: KeyQuality,
    pub use_sevenths: bool,
}

pub const PRESETS: &[Preset] = &[
    Preset { name: "I - IV - V", value: "I-IV-V", description: "Classic Rock", quality: KeyQuality::Major, use_sevenths: false },
    Preset { name: "I - V - vi - IV", value: "I-V-vi-IV", description: "Pop", quality: KeyQuality::Major, use_sevenths: false },
    Preset { name: "ii - V - I", value: "ii-V-I", description: "Jazz", quality: KeyQuality::Major, use_sevenths: true },
    Preset { name: "I - vi - ii - V", value: "I-vi-ii-V", description: "50s Progression", quality: KeyQuality::Major, use_sevenths: true },
    Preset { name: "i - VI - III - VII", value: "i-VI-III-VII", description: "Minor Pop", quality: KeyQuality::Minor, use_sevenths: false },
    Preset { name: "i - iv - v", value: "i-iv-v", description: "Minor Blues", quality: KeyQuality::Minor, use_sevenths: false },
    Preset { name: "I - iii - IV - V", value: "I-iii-IV-V", description: "Doo-Wop", quality: KeyQuality::Major, use_sevenths: false },
    Preset { name: "vi - IV - I - V", value: "vi-IV-I-V", description: "Sensitive", quality: KeyQuality::Major, use_sevenths: false },
];

/// Find a preset by its numeral string or description ("Jazz").
pub fn preset(name: &str) -> Option<&'static Preset> {
    let name = name.trim();
    let wanted = fold_key(name);
    PRESETS
        .iter()
        .find(|p| p.value == name)
        .or_else(|| PRESETS.iter().find(|p| fold_key(p.description) == wanted))
}

/// Placeholder chords shown before any progression is loaded. They carry no
/// numeral or progression name.
pub fn default_chords(count: usize) -> Vec<Chord> {
    use PitchClass::*;
    let seeds = [
        (C, ChordType::Major, ScaleType::Ionian),
        (A, ChordType::Minor, ScaleType::Aeolian),
        (F, ChordType::Major, ScaleType::Ionian),
        (G, ChordType::Major, ScaleType::Mixolydian),
    ];
    (0..count)
        .map(|i| {
            let (root, chord_type, mode) = seeds.get(i).copied().unwrap_or((C, ChordType::Major, ScaleType::Ionian));
            let mut chord = Chord::new(root, chord_type);
            chord.mode = mode;
            chord
        })
        .collect()
}

/// Root of the chord after `index`, used for leading notes. The last chord has
/// none.
pub fn next_root(chords: &[Chord], index: usize) -> Option<PitchClass> {
    chords.get(index + 1).map(|chord| chord.root)
}

//! # Fret Map
//!
//! Maps (string, fret) positions to pitch classes for display and to absolute
//! pitches for playback. A `FretMap` owns its instrument selection; callers
//! build one per render request and pass it explicitly.
//!
//! ## Example
//! ```rust
//! use fretwise::{FretMap, Instrument, GuitarTuning, PitchClass};
//!
//! let map = FretMap::new(Instrument::Guitar, GuitarTuning::Standard, 12);
//! assert_eq!(map.pitch_at(0, 0)?, PitchClass::E);
//! assert_eq!(map.pitch_at(0, 1)?, PitchClass::F);
//! assert_eq!(map.absolute_pitch(5, 0)?.to_string(), "E2");
//! # Ok::<(), fretwise::FretError>(())
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::FretError;
use crate::instrument::{GuitarTuning, Instrument, Tuning};
use crate::pitch::{AbsolutePitch, PitchClass};

/// Default number of frets shown in the live view.
pub const DEFAULT_FRETS: u8 = 12;

/// Highest fret count any view may request.
pub const MAX_FRETS: u8 = 24;

/// One cell of the fretboard grid. Fret 0 is the open string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FretPosition {
    pub string: usize,
    pub fret: u8,
}

impl FretPosition {
    pub fn new(string: usize, fret: u8) -> Self {
        Self { string, fret }
    }
}

impl fmt::Display for FretPosition {
    /// Renders the "string,fret" key used by the filter-editing boundary.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.string, self.fret)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FretMap {
    instrument: Instrument,
    guitar_tuning: GuitarTuning,
    tuning: Tuning,
    num_frets: u8,
}

impl FretMap {
    /// Build a map for `instrument`. `guitar_tuning` is remembered but only
    /// applies while the instrument is a guitar. `num_frets` is clamped to
    /// 1..=[`MAX_FRETS`].
    pub fn new(instrument: Instrument, guitar_tuning: GuitarTuning, num_frets: u8) -> Self {
        Self {
            instrument,
            guitar_tuning,
            tuning: instrument.tuning(guitar_tuning),
            num_frets: num_frets.clamp(1, MAX_FRETS),
        }
    }

    /// Like [`FretMap::new`], but a fret count outside 1..=[`MAX_FRETS`] is
    /// an error instead of being clamped.
    pub fn checked(instrument: Instrument, guitar_tuning: GuitarTuning, num_frets: u8) -> Result<Self, FretError> {
        if !(1..=MAX_FRETS).contains(&num_frets) {
            return Err(FretError::FretOutOfRange {
                fret: num_frets,
                frets: MAX_FRETS,
            });
        }
        Ok(Self::new(instrument, guitar_tuning, num_frets))
    }

    /// Select an instrument by name ("guitar", "bass5", ...).
    pub fn set_instrument(&mut self, name: &str) -> Result<(), FretError> {
        let instrument: Instrument = name.parse()?;
        self.select(instrument, self.guitar_tuning);
        Ok(())
    }

    /// Select a guitar sub-tuning by name ("drop-d", "dadgad", ...).
    pub fn set_guitar_tuning(&mut self, name: &str) -> Result<(), FretError> {
        let guitar_tuning: GuitarTuning = name.parse()?;
        self.select(self.instrument, guitar_tuning);
        Ok(())
    }

    fn select(&mut self, instrument: Instrument, guitar_tuning: GuitarTuning) {
        self.instrument = instrument;
        self.guitar_tuning = guitar_tuning;
        self.tuning = instrument.tuning(guitar_tuning);
        debug!(
            instrument = instrument.key(),
            tuning = self.tuning.name,
            strings = self.tuning.string_count(),
            "selected fretboard tuning"
        );
    }

    /// Same instrument and tuning with a different fret count, e.g. for export.
    pub fn with_frets(&self, num_frets: u8) -> Self {
        Self::new(self.instrument, self.guitar_tuning, num_frets)
    }

    pub fn instrument(&self) -> Instrument {
        self.instrument
    }

    pub fn guitar_tuning(&self) -> GuitarTuning {
        self.guitar_tuning
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn num_frets(&self) -> u8 {
        self.num_frets
    }

    pub fn string_count(&self) -> usize {
        self.tuning.string_count()
    }

    fn check_string(&self, string: usize) -> Result<(), FretError> {
        if string >= self.string_count() {
            return Err(FretError::StringIndexOutOfRange {
                string,
                strings: self.string_count(),
            });
        }
        Ok(())
    }

    fn check_fret(&self, fret: u8) -> Result<(), FretError> {
        if fret > self.num_frets {
            return Err(FretError::FretOutOfRange {
                fret,
                frets: self.num_frets,
            });
        }
        Ok(())
    }

    /// Open-string pitch, used for string labels.
    pub fn open_string(&self, string: usize) -> Result<PitchClass, FretError> {
        self.check_string(string)?;
        Ok(self.tuning.strings[string])
    }

    /// Open string with its octave, e.g. "E2" for the low string of a guitar.
    pub fn string_label(&self, string: usize) -> Result<String, FretError> {
        Ok(self.absolute_pitch(string, 0)?.to_string())
    }

    /// Pitch class sounding at `fret` on `string`.
    pub fn pitch_at(&self, string: usize, fret: u8) -> Result<PitchClass, FretError> {
        self.check_fret(fret)?;
        Ok(self.open_string(string)?.transpose(fret as i32))
    }

    pub fn pitch_at_position(&self, position: FretPosition) -> Result<PitchClass, FretError> {
        self.pitch_at(position.string, position.fret)
    }

    /// Octave-qualified pitch at a position, for audio triggering.
    ///
    /// The octave is the string's base octave plus one per twelve frets.
    pub fn absolute_pitch(&self, string: usize, fret: u8) -> Result<AbsolutePitch, FretError> {
        let pitch = self.pitch_at(string, fret)?;
        let octave = self.tuning.base_octaves[string] + (fret / 12) as i8;
        Ok(AbsolutePitch::new(pitch, octave))
    }

    /// Other physical strings of the same course, empty for single strings.
    pub fn course_partners(&self, string: usize) -> Result<Vec<usize>, FretError> {
        self.check_string(string)?;
        if !self.tuning.paired_courses {
            return Ok(Vec::new());
        }
        let partner = string ^ 1;
        if partner < self.string_count() {
            Ok(vec![partner])
        } else {
            Ok(Vec::new())
        }
    }

    /// Whether a string carries the visual marker for its course. Only the
    /// even string of a paired course does.
    pub fn is_primary_string(&self, string: usize) -> bool {
        !self.tuning.paired_courses || string % 2 == 0
    }

    /// Every position on the board, string by string, frets ascending.
    pub fn positions(&self) -> impl Iterator<Item = FretPosition> + '_ {
        (0..self.string_count())
            .flat_map(move |string| (0..=self.num_frets).map(move |fret| FretPosition::new(string, fret)))
    }
}

impl Default for FretMap {
    fn default() -> Self {
        Self::new(Instrument::Guitar, GuitarTuning::Standard, DEFAULT_FRETS)
    }
}

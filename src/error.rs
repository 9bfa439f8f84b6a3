//! # Error Types
//!
//! This module defines all error types for the fretwise engine.
//!
//! Configuration and lookup errors fail fast: an unknown note name, chord type,
//! instrument or string index is rejected rather than silently replaced with a
//! default. The one tolerated miss is an unknown progression numeral, which the
//! lenient [`expand`](crate::progression::expand) skips.
//!
//! ## Usage
//! ```rust
//! use fretwise::{FretError, PitchClass};
//!
//! match "H".parse::<PitchClass>() {
//!     Ok(pitch) => println!("{}", pitch),
//!     Err(FretError::InvalidNoteName(name)) => eprintln!("bad note: {}", name),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FretError {
    /// A note name outside the seven naturals with an optional `#` or `b`.
    ///
    /// # Example
    /// ```
    /// # use fretwise::FretError;
    /// let err = FretError::InvalidNoteName("H#".to_string());
    /// assert_eq!(err.to_string(), "Invalid note name: H#");
    /// ```
    #[error("Invalid note name: {0}")]
    InvalidNoteName(String),

    /// Chord type key missing from the chord table.
    ///
    /// # Example
    /// ```
    /// # use fretwise::FretError;
    /// let err = FretError::UnknownChordType("sus9".to_string());
    /// assert_eq!(err.to_string(), "Unknown chord type: sus9");
    /// ```
    #[error("Unknown chord type: {0}")]
    UnknownChordType(String),

    /// Scale or mode key missing from the scale table.
    ///
    /// # Example
    /// ```
    /// # use fretwise::FretError;
    /// let err = FretError::UnknownScaleType("bebop".to_string());
    /// assert_eq!(err.to_string(), "Unknown scale type: bebop");
    /// ```
    #[error("Unknown scale type: {0}")]
    UnknownScaleType(String),

    #[error("Unknown instrument: {0}")]
    UnknownInstrument(String),

    #[error("Unknown guitar tuning: {0}")]
    UnknownTuning(String),

    #[error("Unknown key quality: {0} (expected major or minor)")]
    UnknownKeyQuality(String),

    /// A fretboard position references a string the active tuning does not have.
    ///
    /// # Example
    /// ```
    /// # use fretwise::FretError;
    /// let err = FretError::StringIndexOutOfRange { string: 5, strings: 4 };
    /// assert_eq!(err.to_string(), "String index 5 out of range for a 4-string tuning");
    /// ```
    #[error("String index {string} out of range for a {strings}-string tuning")]
    StringIndexOutOfRange { string: usize, strings: usize },

    #[error("Fret {fret} out of range (fretboard has {frets} frets)")]
    FretOutOfRange { fret: u8, frets: u8 },

    /// A progression numeral that is not in the vocabulary for the key quality.
    ///
    /// Only raised by [`expand_strict`](crate::progression::expand_strict).
    ///
    /// # Example
    /// ```
    /// # use fretwise::FretError;
    /// let err = FretError::UnresolvableNumeral {
    ///     numeral: "VIII".to_string(),
    ///     quality: "major".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Numeral 'VIII' is not part of the major-key vocabulary");
    /// ```
    #[error("Numeral '{numeral}' is not part of the {quality}-key vocabulary")]
    UnresolvableNumeral { numeral: String, quality: String },

    #[error("Invalid playback style: {0}")]
    InvalidPlaybackStyle(String),

    /// A chord that cannot be rendered or played: its mode is not offered for
    /// its type, or a filtered position lies off the fretboard.
    #[error("Invalid chord: {0}")]
    InvalidChord(String),

    /// Invalid settings document.
    ///
    /// # Example
    /// ```
    /// # use fretwise::FretError;
    /// let err = FretError::ConfigError("frets must be between 1 and 24".to_string());
    /// assert_eq!(err.to_string(), "Invalid settings: frets must be between 1 and 24");
    /// ```
    #[error("Invalid settings: {0}")]
    ConfigError(String),
}

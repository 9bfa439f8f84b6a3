//! # fretwise
//!
//! A music-theory engine for fretboard diagrams: chord and scale spelling,
//! roman-numeral progressions, fretted-instrument tunings, per-position
//! classification, and playback schedules.
//!
//! Data flows one way. [`pitch`] underlies [`chord`] and [`scale`];
//! [`progression`] places chords in a key; [`fretmap`] maps positions to
//! pitches; [`classify`] decides what each cell shows; [`diagram`] and
//! [`playback`] are what renderers and audio backends consume.
//!
//! ## Example
//! ```rust
//! use fretwise::{chord_diagram, render_text, ClassifyContext, FretMap};
//!
//! let map = FretMap::default();
//! let diagram = chord_diagram(&map, "D", "m7", Some("dorian"), &ClassifyContext::default())?;
//! assert!(render_text(&diagram).starts_with("Dm7 (Dorian)"));
//! # Ok::<(), fretwise::FretError>(())
//! ```

pub mod chord;
pub mod classify;
pub mod diagram;
pub mod error;
pub mod fretmap;
pub mod instrument;
pub mod pitch;
pub mod playback;
pub mod progression;
pub mod scale;
pub mod settings;
pub mod text;

pub use chord::{Chord, ChordType, IntervalLabel, PositionFilter};
pub use classify::{classify, ClassifyContext, PositionCategory, View};
pub use diagram::{build_progression, Diagram, DisplayOptions, MarkerStyle};
pub use error::*;
pub use fretmap::{FretMap, FretPosition};
pub use instrument::{GuitarTuning, Instrument, Tuning};
pub use pitch::{AbsolutePitch, PitchClass};
pub use progression::{KeyQuality, Preset, PRESETS};
pub use scale::ScaleType;
pub use settings::{Settings, Theme};
pub use text::render_text;

/// Build a chord from user-facing names: a root ("F#"), a chord type key or
/// symbol ("m7", "dominant7") and an optional mode ("dorian").
pub fn parse_chord(root: &str, chord_type: &str, mode: Option<&str>) -> Result<Chord, FretError> {
    let chord = Chord::new(root.parse()?, chord_type.parse()?);
    match mode {
        Some(mode) => chord.with_mode(mode.parse()?),
        None => Ok(chord),
    }
}

/// Diagram for a single chord given by name.
/// This is the main entry point for the single-chord view.
pub fn chord_diagram(
    fret_map: &FretMap,
    root: &str,
    chord_type: &str,
    mode: Option<&str>,
    context: &ClassifyContext,
) -> Result<Diagram, FretError> {
    let chord = parse_chord(root, chord_type, mode)?;
    Diagram::build(fret_map, &chord, context)
}

/// Expand a progression strictly and build one diagram per chord.
///
/// `progression` may be a numeral string ("ii-V-I") or a preset name
/// ("Jazz"). A preset supplies its own quality and sevenths default unless
/// they are given; a bare numeral string defaults to major triads.
pub fn progression_diagrams(
    fret_map: &FretMap,
    progression: &str,
    key: &str,
    quality: Option<&str>,
    use_sevenths: Option<bool>,
    options: DisplayOptions,
) -> Result<(Vec<Chord>, Vec<Diagram>), FretError> {
    let chords = progression_chords(progression, key, quality, use_sevenths)?;
    let diagrams = build_progression(fret_map, &chords, options)?;
    Ok((chords, diagrams))
}

/// Resolve a numeral string or preset name into chords.
pub fn progression_chords(
    progression: &str,
    key: &str,
    quality: Option<&str>,
    use_sevenths: Option<bool>,
) -> Result<Vec<Chord>, FretError> {
    let key: PitchClass = key.parse()?;
    let quality = quality.map(str::parse::<KeyQuality>).transpose()?;
    let (numerals, quality, sevenths) = match progression::preset(progression) {
        Some(preset) => (
            preset.value,
            quality.unwrap_or(preset.quality),
            use_sevenths.unwrap_or(preset.use_sevenths),
        ),
        None => (progression, quality.unwrap_or_default(), use_sevenths.unwrap_or(false)),
    };
    progression::expand_strict(numerals, key, quality, sevenths)
}

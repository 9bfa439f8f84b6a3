use serde::Serialize;
use wasm_bindgen::prelude::*;

use fretwise::fretmap::MAX_FRETS;
use fretwise::playback::{schedule_chord, schedule_progression, PlaybackOptions};
use fretwise::{
    build_progression, parse_chord, progression_chords, Chord, ClassifyContext, Diagram, DisplayOptions, FretError,
    FretMap, FretPosition, PositionFilter, PRESETS,
};

#[derive(Serialize)]
struct BridgeError {
    message: String,
    kind: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProgressionView {
    chords: Vec<Chord>,
    diagrams: Vec<Diagram>,
}

fn error_kind(e: &FretError) -> &'static str {
    match e {
        FretError::InvalidNoteName(_) => "invalidNoteName",
        FretError::UnknownChordType(_) => "unknownChordType",
        FretError::UnknownScaleType(_) => "unknownScaleType",
        FretError::UnknownInstrument(_) => "unknownInstrument",
        FretError::UnknownTuning(_) => "unknownTuning",
        FretError::UnknownKeyQuality(_) => "unknownKeyQuality",
        FretError::StringIndexOutOfRange { .. } => "stringIndexOutOfRange",
        FretError::FretOutOfRange { .. } => "fretOutOfRange",
        FretError::UnresolvableNumeral { .. } => "unresolvableNumeral",
        FretError::InvalidPlaybackStyle(_) => "invalidPlaybackStyle",
        FretError::InvalidChord(_) => "invalidChord",
        FretError::ConfigError(_) => "configError",
    }
}

fn error_to_js(e: FretError) -> JsValue {
    let error = BridgeError {
        message: e.to_string(),
        kind: error_kind(&e),
    };
    let json = serde_json::to_string(&error).unwrap_or_else(|_| format!("{{\"message\":{:?}}}", error.message));
    JsValue::from_str(&json)
}

fn to_json<T: Serialize>(value: &T) -> Result<String, FretError> {
    serde_json::to_string(value).map_err(|e| FretError::ConfigError(e.to_string()))
}

fn fret_map(instrument: &str, tuning: Option<String>, frets: u8) -> Result<FretMap, FretError> {
    let guitar_tuning = match tuning.as_deref() {
        Some(name) => name.parse()?,
        None => Default::default(),
    };
    FretMap::checked(instrument.parse()?, guitar_tuning, frets)
}

fn playback_options(options_json: Option<String>) -> Result<PlaybackOptions, FretError> {
    match options_json.as_deref() {
        Some(json) => serde_json::from_str(json).map_err(|e| FretError::ConfigError(e.to_string())),
        None => Ok(PlaybackOptions::default()),
    }
}

/// Positions JSON such as `[{"string":4,"fret":0}]`; absent means unfiltered.
fn position_filter(positions_json: Option<String>) -> Result<PositionFilter, FretError> {
    match positions_json.as_deref() {
        Some(json) => {
            let positions: Vec<FretPosition> =
                serde_json::from_str(json).map_err(|e| FretError::InvalidChord(e.to_string()))?;
            Ok(PositionFilter::Filtered(positions.into_iter().collect()))
        }
        None => Ok(PositionFilter::Unfiltered),
    }
}

/// Chord from names plus an optional positions filter. `editing` shows every
/// valid position so the renderer can toggle filtered ones back on.
fn chord_from(
    root: &str,
    chord_type: &str,
    mode: Option<String>,
    positions_json: Option<String>,
    editing: bool,
) -> Result<Chord, FretError> {
    let mut chord = parse_chord(root, chord_type, mode.as_deref())?;
    chord.filter = position_filter(positions_json)?;
    chord.is_filtering = editing;
    Ok(chord)
}

fn single_chord_context(show_scale_notes: bool) -> ClassifyContext {
    DisplayOptions {
        show_scale_notes,
        show_leading_notes: false,
    }
    .context_for(&[], 0)
}

#[allow(clippy::too_many_arguments)]
fn diagram_json(
    instrument: &str,
    tuning: Option<String>,
    frets: u8,
    root: &str,
    chord_type: &str,
    mode: Option<String>,
    positions_json: Option<String>,
    editing: bool,
    show_scale_notes: bool,
) -> Result<String, FretError> {
    let map = fret_map(instrument, tuning, frets)?;
    let chord = chord_from(root, chord_type, mode, positions_json, editing)?;
    to_json(&Diagram::build(&map, &chord, &single_chord_context(show_scale_notes))?)
}

/// Classified fretboard for one chord, as JSON
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn diagram(
    instrument: &str,
    tuning: Option<String>,
    frets: u8,
    root: &str,
    chord_type: &str,
    mode: Option<String>,
    positions_json: Option<String>,
    editing: bool,
    show_scale_notes: bool,
) -> Result<String, JsValue> {
    diagram_json(instrument, tuning, frets, root, chord_type, mode, positions_json, editing, show_scale_notes)
        .map_err(error_to_js)
}

#[allow(clippy::too_many_arguments)]
fn export_diagram_json(
    instrument: &str,
    tuning: Option<String>,
    max_fret: u8,
    root: &str,
    chord_type: &str,
    mode: Option<String>,
    positions_json: Option<String>,
    show_scale_notes: bool,
) -> Result<String, FretError> {
    let map = fret_map(instrument, tuning, max_fret)?;
    let chord = chord_from(root, chord_type, mode, positions_json, false)?;
    to_json(&Diagram::build_for_export(
        &map,
        &chord,
        &single_chord_context(show_scale_notes),
        max_fret,
    )?)
}

/// Fretboard for one chord at the export fret count, as JSON
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn export_diagram(
    instrument: &str,
    tuning: Option<String>,
    max_fret: u8,
    root: &str,
    chord_type: &str,
    mode: Option<String>,
    positions_json: Option<String>,
    show_scale_notes: bool,
) -> Result<String, JsValue> {
    export_diagram_json(instrument, tuning, max_fret, root, chord_type, mode, positions_json, show_scale_notes)
        .map_err(error_to_js)
}

#[allow(clippy::too_many_arguments)]
fn seed_filter_json(
    instrument: &str,
    tuning: Option<String>,
    frets: u8,
    root: &str,
    chord_type: &str,
    mode: Option<String>,
    show_scale_notes: bool,
) -> Result<String, FretError> {
    let map = fret_map(instrument, tuning, frets)?;
    let mut chord = chord_from(root, chord_type, mode, None, false)?;
    chord.begin_filtering(&map, &single_chord_context(show_scale_notes));
    match &chord.filter {
        PositionFilter::Filtered(positions) => to_json(positions),
        PositionFilter::Unfiltered => to_json(&Vec::<FretPosition>::new()),
    }
}

/// Starting positions for filter editing: every position currently shown,
/// as JSON in the same shape `diagram` accepts
#[wasm_bindgen]
pub fn seed_filter(
    instrument: &str,
    tuning: Option<String>,
    frets: u8,
    root: &str,
    chord_type: &str,
    mode: Option<String>,
    show_scale_notes: bool,
) -> Result<String, JsValue> {
    seed_filter_json(instrument, tuning, frets, root, chord_type, mode, show_scale_notes).map_err(error_to_js)
}

#[allow(clippy::too_many_arguments)]
fn progression_json(
    instrument: &str,
    tuning: Option<String>,
    frets: u8,
    progression: &str,
    key: &str,
    quality: Option<String>,
    use_sevenths: Option<bool>,
    options: DisplayOptions,
) -> Result<String, FretError> {
    let map = fret_map(instrument, tuning, frets)?;
    let chords = progression_chords(progression, key, quality.as_deref(), use_sevenths)?;
    let diagrams = build_progression(&map, &chords, options)?;
    to_json(&ProgressionView { chords, diagrams })
}

/// Chords and diagrams for a progression or preset name, as JSON
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn progression(
    instrument: &str,
    tuning: Option<String>,
    frets: u8,
    progression: &str,
    key: &str,
    quality: Option<String>,
    use_sevenths: Option<bool>,
    show_scale_notes: bool,
    show_leading_notes: bool,
) -> Result<String, JsValue> {
    let options = DisplayOptions {
        show_scale_notes,
        show_leading_notes,
    };
    progression_json(instrument, tuning, frets, progression, key, quality, use_sevenths, options)
        .map_err(error_to_js)
}

fn playback_chord_json(
    instrument: &str,
    tuning: Option<String>,
    root: &str,
    chord_type: &str,
    mode: Option<String>,
    positions_json: Option<String>,
    options_json: Option<String>,
) -> Result<String, FretError> {
    let map = fret_map(instrument, tuning, MAX_FRETS)?;
    let mut chord = parse_chord(root, chord_type, mode.as_deref())?;
    chord.filter = position_filter(positions_json)?;
    to_json(&schedule_chord(&map, &chord, &playback_options(options_json)?)?)
}

/// Playback schedule for a single chord, optionally limited to filtered positions
#[wasm_bindgen]
pub fn playback_chord(
    instrument: &str,
    tuning: Option<String>,
    root: &str,
    chord_type: &str,
    mode: Option<String>,
    positions_json: Option<String>,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    playback_chord_json(instrument, tuning, root, chord_type, mode, positions_json, options_json)
        .map_err(error_to_js)
}

fn playback_json(
    instrument: &str,
    tuning: Option<String>,
    progression: &str,
    key: &str,
    quality: Option<String>,
    use_sevenths: Option<bool>,
    options_json: Option<String>,
) -> Result<String, FretError> {
    let map = fret_map(instrument, tuning, MAX_FRETS)?;
    let chords = progression_chords(progression, key, quality.as_deref(), use_sevenths)?;
    to_json(&schedule_progression(&map, &chords, &playback_options(options_json)?)?)
}

/// Playback schedule for a progression, chords in sequence
#[wasm_bindgen]
pub fn playback(
    instrument: &str,
    tuning: Option<String>,
    progression: &str,
    key: &str,
    quality: Option<String>,
    use_sevenths: Option<bool>,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    playback_json(instrument, tuning, progression, key, quality, use_sevenths, options_json).map_err(error_to_js)
}

/// Built-in progressions as a JSON array
#[wasm_bindgen]
pub fn presets() -> String {
    serde_json::to_string(PRESETS).unwrap_or_else(|_| "[]".to_string())
}

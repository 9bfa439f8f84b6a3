//! # Diagrams
//!
//! A renderer-neutral fretboard grid. Both the live fretboard and the export
//! renderer build a [`Diagram`] and draw from its cells, so the two can only
//! differ in presentation. Presentation itself is a lookup keyed by
//! [`PositionCategory`] ([`MarkerStyle::for_category`]).
//!
//! ## Example
//! ```rust
//! use fretwise::{Chord, ChordType, ClassifyContext, Diagram, FretMap, PitchClass};
//!
//! let map = FretMap::default();
//! let chord = Chord::new(PitchClass::G, ChordType::Major);
//! let diagram = Diagram::build(&map, &chord, &ClassifyContext::default())?;
//!
//! assert_eq!(diagram.title, "G (Ionian)");
//! assert_eq!(diagram.strings.len(), 6);
//! assert_eq!(diagram.strings[0].cells.len(), 13); // open string + 12 frets
//! # Ok::<(), fretwise::FretError>(())
//! ```

use serde::Serialize;

use crate::chord::Chord;
use crate::classify::{classify, ClassifyContext, PositionCategory};
use crate::error::FretError;
use crate::fretmap::{FretMap, FretPosition};
use crate::instrument::Instrument;
use crate::pitch::PitchClass;
use crate::progression::next_root;

/// Position dots printed under the fretboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Inlay {
    None,
    Single,
    Double,
}

impl Inlay {
    pub fn at(fret: u8) -> Self {
        match fret {
            12 | 24 => Inlay::Double,
            3 | 5 | 7 | 9 | 15 | 17 | 19 | 21 => Inlay::Single,
            _ => Inlay::None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Shape {
    Circle,
    Triangle,
    SmallCircle,
}

/// How a category is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerStyle {
    /// CSS class used by the DOM renderer.
    pub class: &'static str,
    pub shape: Shape,
}

impl MarkerStyle {
    pub fn for_category(category: &PositionCategory) -> Option<Self> {
        let (class, shape) = match category {
            PositionCategory::Root => ("root", Shape::Circle),
            PositionCategory::LeadingTone => ("leading-note", Shape::Triangle),
            PositionCategory::ChordTone(_) => ("chord-tone", Shape::Circle),
            PositionCategory::ScaleTone(_) => ("scale-note", Shape::SmallCircle),
            PositionCategory::Hidden => return None,
        };
        Some(Self { class, shape })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    pub position: FretPosition,
    pub note: PitchClass,
    pub category: PositionCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<MarkerStyle>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StringRow {
    pub index: usize,
    pub open: PitchClass,
    /// Open string with octave, e.g. "E2".
    pub label: String,
    /// False for the doubled string of a paired course.
    pub primary: bool,
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagram {
    pub title: String,
    pub instrument: Instrument,
    pub tuning: &'static str,
    pub num_frets: u8,
    pub strings: Vec<StringRow>,
    /// Inlay for each fret, index = fret number.
    pub inlays: Vec<Inlay>,
}

impl Diagram {
    /// Classify every cell of `fret_map` for `chord`.
    ///
    /// Fails with [`FretError::InvalidChord`] instead of drawing an empty board
    /// when the chord does not fit the map.
    pub fn build(fret_map: &FretMap, chord: &Chord, context: &ClassifyContext) -> Result<Self, FretError> {
        chord.validate(fret_map)?;

        let mut strings = Vec::with_capacity(fret_map.string_count());
        for string in 0..fret_map.string_count() {
            let mut cells = Vec::with_capacity(fret_map.num_frets() as usize + 1);
            for fret in 0..=fret_map.num_frets() {
                let position = FretPosition::new(string, fret);
                let category = classify(fret_map, chord, position, context)?;
                cells.push(Cell {
                    position,
                    note: fret_map.pitch_at(string, fret)?,
                    label: category.label(),
                    style: MarkerStyle::for_category(&category),
                    category,
                });
            }
            strings.push(StringRow {
                index: string,
                open: fret_map.open_string(string)?,
                label: fret_map.string_label(string)?,
                primary: fret_map.is_primary_string(string),
                cells,
            });
        }

        Ok(Self {
            title: chord.title(),
            instrument: fret_map.instrument(),
            tuning: fret_map.tuning().name,
            num_frets: fret_map.num_frets(),
            strings,
            inlays: (0..=fret_map.num_frets()).map(Inlay::at).collect(),
        })
    }

    /// Build for export at its own fret count, independent of the live view.
    pub fn build_for_export(
        fret_map: &FretMap,
        chord: &Chord,
        context: &ClassifyContext,
        max_fret: u8,
    ) -> Result<Self, FretError> {
        Self::build(&fret_map.with_frets(max_fret), chord, context)
    }

    pub fn cell(&self, position: FretPosition) -> Option<&Cell> {
        self.strings
            .get(position.string)
            .and_then(|row| row.cells.get(position.fret as usize))
    }

    /// Cells that carry a marker.
    pub fn visible_cells(&self) -> impl Iterator<Item = &Cell> {
        self.strings
            .iter()
            .flat_map(|row| row.cells.iter())
            .filter(|cell| cell.category.is_visible())
    }
}

/// Display toggles shared by every chord of a progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayOptions {
    pub show_scale_notes: bool,
    pub show_leading_notes: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_scale_notes: true,
            show_leading_notes: false,
        }
    }
}

impl DisplayOptions {
    /// Classification context for chord `index`, pointing leading notes at the
    /// following chord.
    pub fn context_for(&self, chords: &[Chord], index: usize) -> ClassifyContext {
        ClassifyContext {
            next_chord_root: next_root(chords, index),
            show_leading_notes: self.show_leading_notes,
            show_scale_notes: self.show_scale_notes,
        }
    }
}

/// One diagram per chord, with leading notes pointing at the next chord.
pub fn build_progression(
    fret_map: &FretMap,
    chords: &[Chord],
    options: DisplayOptions,
) -> Result<Vec<Diagram>, FretError> {
    chords
        .iter()
        .enumerate()
        .map(|(index, chord)| Diagram::build(fret_map, chord, &options.context_for(chords, index)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chord::{ChordType, PositionFilter};
    use crate::instrument::GuitarTuning;
    use crate::progression::{expand, KeyQuality};
    use crate::scale::ScaleType;
    use PitchClass::*;

    #[test]
    fn test_inlays() {
        assert_eq!(Inlay::at(0), Inlay::None);
        assert_eq!(Inlay::at(3), Inlay::Single);
        assert_eq!(Inlay::at(12), Inlay::Double);
        assert_eq!(Inlay::at(13), Inlay::None);
    }

    #[test]
    fn test_marker_styles() {
        assert_eq!(MarkerStyle::for_category(&PositionCategory::Hidden), None);
        let leading = MarkerStyle::for_category(&PositionCategory::LeadingTone).unwrap();
        assert_eq!(leading.shape, Shape::Triangle);
        assert_eq!(leading.class, "leading-note");
    }

    #[test]
    fn test_export_matches_live_view() {
        let map = FretMap::default();
        let mut chord = Chord::new(A, ChordType::Minor7);
        chord.filter = PositionFilter::Filtered([FretPosition::new(4, 0), FretPosition::new(3, 2)].into_iter().collect());
        let context = ClassifyContext {
            next_chord_root: Some(D),
            show_leading_notes: true,
            show_scale_notes: true,
        };

        let live = Diagram::build(&map, &chord, &context).unwrap();
        let export = Diagram::build_for_export(&map, &chord, &context, 15).unwrap();

        assert_eq!(export.num_frets, 15);
        for row in &live.strings {
            for cell in &row.cells {
                assert_eq!(export.cell(cell.position).map(|c| &c.category), Some(&cell.category));
            }
        }
        assert_eq!(live.visible_cells().count(), 2);
    }

    #[test]
    fn test_invalid_chord_surfaces_error() {
        let map = FretMap::new(Instrument::Bass4, GuitarTuning::Standard, 12);
        let mut chord = Chord::new(C, ChordType::Major);
        chord.filter = PositionFilter::Filtered([FretPosition::new(5, 3)].into_iter().collect());
        assert!(matches!(
            Diagram::build(&map, &chord, &ClassifyContext::default()),
            Err(FretError::InvalidChord(_))
        ));

        let mut off_menu = Chord::new(C, ChordType::Major);
        off_menu.mode = ScaleType::Altered;
        assert!(Diagram::build(&map, &off_menu, &ClassifyContext::default()).is_err());
    }

    #[test]
    fn test_progression_leading_notes_point_forward() {
        let map = FretMap::default();
        let chords = expand("I-V", C, KeyQuality::Major, false);
        let options = DisplayOptions {
            show_scale_notes: false,
            show_leading_notes: true,
        };
        let diagrams = build_progression(&map, &chords, options).unwrap();
        assert_eq!(diagrams.len(), 2);
        assert_eq!(diagrams[0].title, "I - C (Ionian)");

        // F# leads into G on the first chord only.
        let f_sharp = FretPosition::new(0, 2);
        assert_eq!(diagrams[0].cell(f_sharp).unwrap().category, PositionCategory::LeadingTone);
        assert_eq!(diagrams[1].cell(f_sharp).unwrap().category, PositionCategory::Hidden);
    }

    #[test]
    fn test_mandolin_rows() {
        let map = FretMap::new(Instrument::Mandolin, GuitarTuning::Standard, 7);
        let diagram = Diagram::build(&map, &Chord::new(D, ChordType::Major), &ClassifyContext::default()).unwrap();
        assert_eq!(diagram.strings.len(), 8);
        assert!(!diagram.strings[1].primary);
        assert!(diagram.strings[1].cells.iter().all(|c| !c.category.is_visible()));
    }
}

//! Plain-text fretboard rendering for terminals.

use std::fmt::Write;

use crate::classify::PositionCategory;
use crate::diagram::{Diagram, Inlay};

const CELL_WIDTH: usize = 5;

fn marker(category: &PositionCategory, note: &str) -> String {
    match category {
        PositionCategory::Root => format!("{}R", note),
        PositionCategory::LeadingTone => "L".to_string(),
        PositionCategory::ChordTone(label) => format!("{}{}", note, label),
        PositionCategory::ScaleTone(degree) => format!("{}", degree),
        PositionCategory::Hidden => String::new(),
    }
}

/// Render a diagram as one line per string plus fret numbers and inlays.
///
/// Roots show as `CR`, chord tones as note + interval (`E3`, `G5`), scale
/// tones as their degree and leading tones as `L`.
pub fn render_text(diagram: &Diagram) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", diagram.title);

    for row in &diagram.strings {
        let _ = write!(out, "{:>2} ", row.open.name());
        for cell in &row.cells {
            let text = marker(&cell.category, cell.note.name());
            let fill = if cell.position.fret == 0 { ' ' } else { '-' };
            let separator = if cell.position.fret == 0 { "||" } else { "|" };
            let padded: String = if text.is_empty() {
                std::iter::repeat(fill).take(CELL_WIDTH).collect()
            } else {
                format!("{:^width$}", text, width = CELL_WIDTH)
            };
            let _ = write!(out, "{}{}", padded, separator);
        }
        out.push('\n');
    }

    out.push_str("   ");
    for fret in 0..=diagram.num_frets {
        let _ = write!(out, "{:^width$} ", fret, width = CELL_WIDTH);
        if fret == 0 {
            out.push(' ');
        }
    }
    out.push('\n');

    out.push_str("   ");
    for inlay in &diagram.inlays {
        let dots = match inlay {
            Inlay::None => "",
            Inlay::Single => "*",
            Inlay::Double => "**",
        };
        let _ = write!(out, "{:^width$} ", dots, width = CELL_WIDTH);
    }
    out.push('\n');

    out
}

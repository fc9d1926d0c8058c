//! Plain-text rendering of grid snapshots for terminals

use crate::domain::cell::Cell;
use crate::domain::grid::Grid;

const EMPTY_MARK: char = '.';
const RETIRED_MARK: char = ' ';

fn glyph(cell: &Cell) -> char {
    match (cell.visible, cell.ch) {
        (false, _) => RETIRED_MARK,
        (true, Some(letter)) => letter,
        (true, None) => EMPTY_MARK,
    }
}

/// Renders a snapshot as one line per row, letters separated by spaces
///
/// Visible empty cells show as `.`, retired cells as blanks.
pub fn render_rows(grid: &Grid) -> Vec<String> {
    grid.iter_rows()
        .map(|row| {
            let glyphs: Vec<String> = row.iter().map(|c| glyph(c).to_string()).collect();
            glyphs.join(" ")
        })
        .collect()
}

/// Renders fold depths in the same layout, `-` for retired cells
pub fn render_depths(grid: &Grid) -> Vec<String> {
    grid.iter_rows()
        .map(|row| {
            let depths: Vec<String> = row
                .iter()
                .map(|c| if c.visible { c.depth.to_string() } else { "-".into() })
                .collect();
            depths.join(" ")
        })
        .collect()
}

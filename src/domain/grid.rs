//! Letter grid construction and extraction
//!
//! This module lays a normalized message into a fixed-size grid of cells and
//! reads the visible letters back out. Grid dimensions are fixed once built;
//! folds only change cell contents and visibility.

use serde::Serialize;
use thiserror::Error;

use crate::domain::cell::Cell;

/// Errors that can occur while building a grid
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Width is outside the supported range
    #[error("grid width {width} is outside {min}..={max}")]
    InvalidWidth { width: usize, min: usize, max: usize },
}

/// Rectangular row-major table of cells
///
/// A `Grid` is a value: folding produces a new grid and never mutates one
/// that has already been handed out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Narrowest supported grid
    pub const MIN_WIDTH: usize = 3;
    /// Widest supported grid
    pub const MAX_WIDTH: usize = 10;

    /// Returns the grid dimensions as (rows, cols)
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns true if the grid has no rows
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Gets the cell at (row, col), or None when out of range
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        if row < self.rows && col < self.cols {
            self.cells.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Returns one row of cells
    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        if row < self.rows {
            let start = row * self.cols;
            Some(&self.cells[start..start + self.cols])
        } else {
            None
        }
    }

    /// Iterates rows top to bottom
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> {
        // chunks(0) panics, and a zero-column grid has no rows anyway
        self.cells.chunks(self.cols.max(1))
    }

    /// All cells in row-major order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of cells holding a letter, visible or not
    pub fn letter_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_letter()).count()
    }

    pub(crate) fn cell_mut(&mut self, row: usize, col: usize) -> &mut Cell {
        &mut self.cells[row * self.cols + col]
    }
}

/// Uppercases text and drops everything outside `A..=Z`
pub fn normalize(text: &str) -> String {
    text.to_uppercase()
        .chars()
        .filter(|c| c.is_ascii_uppercase())
        .collect()
}

/// Checks that a width is within the supported range
pub fn validate_width(width: usize) -> Result<usize, GridError> {
    if (Grid::MIN_WIDTH..=Grid::MAX_WIDTH).contains(&width) {
        Ok(width)
    } else {
        Err(GridError::InvalidWidth {
            width,
            min: Grid::MIN_WIDTH,
            max: Grid::MAX_WIDTH,
        })
    }
}

/// Builds the initial grid for a message
///
/// Text is normalized first. An empty normalized message yields a valid grid
/// with zero rows. Positions past the end of the message are empty cells.
///
/// # Example
/// ```rust
/// use origami_fold::domain::grid::build_grid;
///
/// let grid = build_grid("Hello, world!", 5).unwrap();
/// assert_eq!(grid.dimensions(), (2, 5));
/// ```
pub fn build_grid(text: &str, width: usize) -> Result<Grid, GridError> {
    let cols = validate_width(width)?;
    Ok(layout_grid(text, cols))
}

/// Lays text into a grid of `cols` columns without checking the width
pub(crate) fn layout_grid(text: &str, cols: usize) -> Grid {
    let letters: Vec<char> = normalize(text).chars().collect();
    let rows = letters.len().div_ceil(cols);

    let mut cells = Vec::with_capacity(rows * cols);
    for index in 0..rows * cols {
        let cell = letters
            .get(index)
            .and_then(|&letter| Cell::from_letter(letter))
            .unwrap_or_else(Cell::empty);
        cells.push(cell);
    }

    Grid { rows, cols, cells }
}

/// Reads visible letters in row-major order
pub fn extract(grid: &Grid) -> String {
    grid.cells.iter().filter_map(Cell::visible_letter).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hello_world_layout() {
        let grid = build_grid("HELLOWORLD", 5).unwrap();
        assert_eq!(grid.dimensions(), (2, 5));

        let top: String = grid.row(0).unwrap().iter().filter_map(|c| c.ch).collect();
        let bottom: String = grid.row(1).unwrap().iter().filter_map(|c| c.ch).collect();
        assert_eq!(top, "HELLO");
        assert_eq!(bottom, "WORLD");
    }

    #[test]
    fn normalization_strips_and_uppercases() {
        assert_eq!(normalize("Hello, World! 42"), "HELLOWORLD");
        assert_eq!(normalize("straße"), "STRASSE");
        assert_eq!(normalize("123 !?"), "");
    }

    #[test]
    fn partial_last_row_is_padded() {
        let grid = build_grid("abcdefg", 3).unwrap();
        assert_eq!(grid.dimensions(), (3, 3));

        let last = grid.row(2).unwrap();
        assert_eq!(last[0].ch, Some('G'));
        assert_eq!(last[1], Cell::empty());
        assert_eq!(last[2], Cell::empty());
    }

    #[test]
    fn letter_count_matches_normalized_length() {
        let samples = ["", "a", "The quick brown fox!", "zzz-zzz-zzz", "12 ab 34 cd"];
        for text in samples {
            for width in Grid::MIN_WIDTH..=Grid::MAX_WIDTH {
                let grid = build_grid(text, width).unwrap();
                assert_eq!(grid.letter_count(), normalize(text).len(), "{text:?} at {width}");
            }
        }
    }

    #[test]
    fn extract_is_identity_on_unfolded_grid() {
        let samples = ["HELLOWORLD", "attack at dawn", "x", "Fold me, please."];
        for text in samples {
            for width in Grid::MIN_WIDTH..=Grid::MAX_WIDTH {
                let grid = build_grid(text, width).unwrap();
                assert_eq!(extract(&grid), normalize(text));
            }
        }
    }

    #[test]
    fn empty_text_builds_zero_row_grid() {
        let grid = build_grid("!!!", 4).unwrap();
        assert!(grid.is_empty());
        assert_eq!(grid.dimensions(), (0, 4));
        assert_eq!(grid.iter_rows().count(), 0);
        assert_eq!(extract(&grid), "");
    }

    #[test]
    fn width_out_of_range_is_rejected() {
        assert!(matches!(
            build_grid("abc", 2),
            Err(GridError::InvalidWidth { width: 2, .. })
        ));
        assert!(matches!(
            build_grid("abc", 11),
            Err(GridError::InvalidWidth { width: 11, .. })
        ));
        assert!(build_grid("abc", 3).is_ok());
        assert!(build_grid("abc", 10).is_ok());
    }

    #[test]
    fn cell_lookup_bounds() {
        let grid = build_grid("HELLOWORLD", 5).unwrap();
        assert_eq!(grid.cell(1, 4).and_then(|c| c.ch), Some('D'));
        assert!(grid.cell(2, 0).is_none());
        assert!(grid.cell(0, 5).is_none());
        assert!(grid.row(2).is_none());
    }
}

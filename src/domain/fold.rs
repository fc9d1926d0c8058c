//! The fold operator
//!
//! A fold pairs rows (or columns) symmetrically around a pivot, sums each
//! pair into the kept side and retires the other side. The pivot band itself
//! and anything past the shorter side of the pivot are left untouched.
//!
//! ## Guarantees
//! - **Pure**: the input grid is never modified, a new grid is returned
//! - **Total**: every descriptor is accepted; a fold with nothing to pair is a no-op
//! - **Deterministic**: the same grid and descriptor always give the same result

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::domain::cell::Cell;
use crate::domain::grid::Grid;

/// Direction of the fold line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Folds rows onto each other around a pivot row
    Horizontal,
    /// Folds columns onto each other around a pivot column
    Vertical,
}

impl Axis {
    /// Side kept when no side is requested explicitly
    pub fn default_keep(self) -> KeepSide {
        match self {
            Axis::Horizontal => KeepSide::Down,
            Axis::Vertical => KeepSide::Right,
        }
    }

    /// Grid extent along which this axis pairs bands
    pub fn extent(self, grid: &Grid) -> usize {
        match self {
            Axis::Horizontal => grid.rows(),
            Axis::Vertical => grid.cols(),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Horizontal => write!(f, "HORIZONTAL"),
            Axis::Vertical => write!(f, "VERTICAL"),
        }
    }
}

/// Which of the two paired bands survives a fold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeepSide {
    Down,
    Up,
    Right,
    Left,
}

impl KeepSide {
    /// Axis this side belongs to
    pub fn axis(self) -> Axis {
        match self {
            KeepSide::Down | KeepSide::Up => Axis::Horizontal,
            KeepSide::Right | KeepSide::Left => Axis::Vertical,
        }
    }

    /// True when the band past the pivot (higher index) survives
    fn keeps_trailing(self) -> bool {
        matches!(self, KeepSide::Down | KeepSide::Right)
    }
}

impl fmt::Display for KeepSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            KeepSide::Down => "DOWN",
            KeepSide::Up => "UP",
            KeepSide::Right => "RIGHT",
            KeepSide::Left => "LEFT",
        };
        f.write_str(label)
    }
}

/// Errors constructing a fold descriptor
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FoldError {
    #[error("cannot keep {keep} on a {axis} fold")]
    SideMismatch { axis: Axis, keep: KeepSide },
}

/// One fold: axis, pivot index and surviving side
///
/// The pivot is fixed when the descriptor is created and is never
/// recomputed against a different grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FoldDescriptor {
    axis: Axis,
    pivot: usize,
    keep: KeepSide,
}

impl FoldDescriptor {
    /// Creates a descriptor, rejecting a keep side from the other axis
    pub fn new(axis: Axis, pivot: usize, keep: KeepSide) -> Result<Self, FoldError> {
        if keep.axis() != axis {
            return Err(FoldError::SideMismatch { axis, keep });
        }
        Ok(Self { axis, pivot, keep })
    }

    /// Creates a descriptor with the axis' default keep side
    pub fn with_default_keep(axis: Axis, pivot: usize) -> Self {
        Self {
            axis,
            pivot,
            keep: axis.default_keep(),
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn pivot(&self) -> usize {
        self.pivot
    }

    pub fn keep(&self) -> KeepSide {
        self.keep
    }

    /// Number of band pairs this fold merges on the given grid
    ///
    /// Zero means the fold is degenerate and leaves the grid unchanged.
    pub fn pair_count(&self, grid: &Grid) -> usize {
        let extent = self.axis.extent(grid);
        if self.pivot >= extent {
            return 0;
        }
        self.pivot.min(extent - self.pivot - 1)
    }
}

impl fmt::Display for FoldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} FOLD [POS:{}] [KEEP:{}]", self.axis, self.pivot, self.keep)
    }
}

/// Applies one fold and returns the resulting grid
///
/// Bands `pivot - 1 - i` and `pivot + 1 + i` are paired for every `i` below
/// [`FoldDescriptor::pair_count`]. Each pair sums into the kept side with
/// depth `max + 1`; the other side is marked invisible but keeps its value.
/// Pairing reads stored values regardless of visibility.
pub fn apply_fold(grid: &Grid, fold: &FoldDescriptor) -> Grid {
    let mut next = grid.clone();
    let pairs = fold.pair_count(grid);
    let (rows, cols) = grid.dimensions();

    for i in 0..pairs {
        let leading = fold.pivot - 1 - i;
        let trailing = fold.pivot + 1 + i;
        let (kept, retired) = if fold.keep.keeps_trailing() {
            (trailing, leading)
        } else {
            (leading, trailing)
        };

        match fold.axis {
            Axis::Horizontal => {
                for col in 0..cols {
                    merge_into(
                        &mut next,
                        (leading, col),
                        (trailing, col),
                        (kept, col),
                        (retired, col),
                    );
                }
            }
            Axis::Vertical => {
                for row in 0..rows {
                    merge_into(
                        &mut next,
                        (row, leading),
                        (row, trailing),
                        (row, kept),
                        (row, retired),
                    );
                }
            }
        }
    }

    next
}

fn merge_into(
    grid: &mut Grid,
    a: (usize, usize),
    b: (usize, usize),
    kept: (usize, usize),
    retired: (usize, usize),
) {
    let first = *grid.cell_mut(a.0, a.1);
    let second = *grid.cell_mut(b.0, b.1);
    *grid.cell_mut(kept.0, kept.1) = Cell::merged(&first, &second);
    grid.cell_mut(retired.0, retired.1).visible = false;
}

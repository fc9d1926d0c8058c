//! Domain logic and core data structures
//!
//! This module contains the pure fold engine: grid construction, the fold
//! operator, sequence replay and extraction. Nothing here holds state
//! between calls; callers own their grids and sequences.

pub mod cell;
pub mod fold;
pub mod grid;
pub mod runner;
pub mod sequence;

pub use cell::Cell;
pub use fold::{apply_fold, Axis, FoldDescriptor, FoldError, KeepSide};
pub use grid::{build_grid, extract, normalize, Grid, GridError};
pub use runner::{run_sequence, FoldRun, RunOutcome, Step, Steps, Trace};
pub use sequence::{FoldRequest, FoldSequence, ParseFoldError};

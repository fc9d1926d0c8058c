//! Ordered fold sequences and textual fold requests
//!
//! The sequence is an editable list. Pivots are captured from the grid at the
//! moment a fold is added and are never re-derived afterwards.

use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use crate::domain::fold::{Axis, FoldDescriptor, FoldError, KeepSide};
use crate::domain::grid::Grid;

/// Ordered list of folds to replay
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FoldSequence {
    folds: Vec<FoldDescriptor>,
}

impl FoldSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a fold centred on the grid's current midpoint
    ///
    /// The pivot is `floor(extent / 2)` where extent is rows for a horizontal
    /// fold and columns for a vertical one. The keep side is the axis default.
    pub fn add(&mut self, axis: Axis, grid: &Grid) -> FoldDescriptor {
        let pivot = axis.extent(grid) / 2;
        let fold = FoldDescriptor::with_default_keep(axis, pivot);
        self.folds.push(fold);
        fold
    }

    /// Appends an explicit descriptor
    pub fn push(&mut self, fold: FoldDescriptor) {
        self.folds.push(fold);
    }

    /// Removes the fold at `index`, shifting later folds down
    ///
    /// Returns `None` and leaves the sequence alone when out of range.
    pub fn remove(&mut self, index: usize) -> Option<FoldDescriptor> {
        if index < self.folds.len() {
            Some(self.folds.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.folds.clear();
    }

    pub fn len(&self) -> usize {
        self.folds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folds.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&FoldDescriptor> {
        self.folds.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FoldDescriptor> {
        self.folds.iter()
    }

    pub fn as_slice(&self) -> &[FoldDescriptor] {
        &self.folds
    }
}

impl FromIterator<FoldDescriptor> for FoldSequence {
    fn from_iter<I: IntoIterator<Item = FoldDescriptor>>(iter: I) -> Self {
        Self {
            folds: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a FoldSequence {
    type Item = &'a FoldDescriptor;
    type IntoIter = std::slice::Iter<'a, FoldDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.folds.iter()
    }
}

/// Errors parsing a textual fold request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFoldError {
    #[error("unknown fold axis '{0}' (expected h or v)")]
    UnknownAxis(String),
    #[error("invalid pivot '{0}'")]
    InvalidPivot(String),
    #[error("unknown keep side '{0}' (expected up, down, left or right)")]
    UnknownSide(String),
    #[error("malformed fold request '{0}' (expected AXIS or AXIS:PIVOT:SIDE)")]
    Malformed(String),
    #[error(transparent)]
    Fold(#[from] FoldError),
}

/// A fold as requested by a caller before it is bound to a grid
///
/// `Midpoint` resolves its pivot from the grid when added; `Explicit` is
/// appended as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldRequest {
    Midpoint(Axis),
    Explicit(FoldDescriptor),
}

impl FromStr for Axis {
    type Err = ParseFoldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "h" | "horizontal" => Ok(Axis::Horizontal),
            "v" | "vertical" => Ok(Axis::Vertical),
            other => Err(ParseFoldError::UnknownAxis(other.to_string())),
        }
    }
}

impl FromStr for KeepSide {
    type Err = ParseFoldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "down" | "d" => Ok(KeepSide::Down),
            "up" | "u" => Ok(KeepSide::Up),
            "right" | "r" => Ok(KeepSide::Right),
            "left" | "l" => Ok(KeepSide::Left),
            other => Err(ParseFoldError::UnknownSide(other.to_string())),
        }
    }
}

impl FromStr for FoldRequest {
    type Err = ParseFoldError;

    /// Parses `h`, `v`, `h:<pivot>:<side>` or `v:<pivot>:<side>`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        match parts.as_slice() {
            [axis] => Ok(FoldRequest::Midpoint(axis.parse()?)),
            [axis, pivot, side] => {
                let axis: Axis = axis.parse()?;
                let pivot = pivot
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| ParseFoldError::InvalidPivot(pivot.to_string()))?;
                let keep: KeepSide = side.parse()?;
                Ok(FoldRequest::Explicit(FoldDescriptor::new(axis, pivot, keep)?))
            }
            _ => Err(ParseFoldError::Malformed(s.to_string())),
        }
    }
}

//! Fold sequence replay
//!
//! Replays an ordered fold sequence over an initial grid. The computation is
//! exposed two ways over the same step function:
//! - [`run_sequence`] runs everything at once and returns the final grid and trace
//! - [`FoldRun::steps`] yields one [`Step`] at a time so a caller can pace display
//!
//! Each yielded grid is an owned snapshot; nothing a consumer holds is
//! touched by later steps.

use serde::Serialize;
use tracing::debug;

use crate::domain::fold::{apply_fold, FoldDescriptor};
use crate::domain::grid::{extract, Grid};
use crate::domain::sequence::FoldSequence;

/// Ordered, append-only log of a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Trace {
    lines: Vec<String>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&mut self, lines: impl IntoIterator<Item = String>) {
        self.lines.extend(lines);
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Line announcing a fold about to be applied
pub fn fold_line(fold: &FoldDescriptor) -> String {
    format!("INITIATING {fold}")
}

/// Line listing the visible letters after a fold
pub fn state_line(visible: &str) -> String {
    format!("MATRIX STATE: {visible}")
}

/// Line closing a run with its output string
pub fn completion_line(output: &str) -> String {
    format!(">> ENCRYPTION COMPLETE: {output}")
}

/// One applied fold and what it produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    /// Position of the fold in the sequence
    pub index: usize,
    pub fold: FoldDescriptor,
    /// Grid after this fold
    pub grid: Grid,
    /// Trace lines added by this step; the last step also carries the completion line
    pub trace: Vec<String>,
}

impl Step {
    /// True for the final step of the run
    pub fn is_last(&self, total: usize) -> bool {
        self.index + 1 == total
    }
}

/// A fold sequence bound to its starting grid
///
/// Holds its inputs by value so [`FoldRun::steps`] can be called any number
/// of times, each call starting again from the initial grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldRun {
    initial: Grid,
    sequence: FoldSequence,
}

impl FoldRun {
    pub fn new(initial: Grid, sequence: FoldSequence) -> Self {
        Self { initial, sequence }
    }

    pub fn initial(&self) -> &Grid {
        &self.initial
    }

    pub fn sequence(&self) -> &FoldSequence {
        &self.sequence
    }

    /// Lazily replays the sequence one fold per item
    pub fn steps(&self) -> Steps<'_> {
        Steps {
            folds: self.sequence.as_slice(),
            current: self.initial.clone(),
            next: 0,
        }
    }

    /// Runs every step and collects the final grid and full trace
    pub fn run(&self) -> RunOutcome {
        let mut grid = self.initial.clone();
        let mut trace = Trace::new();
        for step in self.steps() {
            trace.extend(step.trace);
            grid = step.grid;
        }
        let output = extract(&grid);
        RunOutcome { grid, trace, output }
    }
}

/// Iterator over the steps of a [`FoldRun`]
///
/// Keeps only the latest grid, so earlier folds are never re-applied.
/// Dropping the iterator is the only cancellation needed.
#[derive(Debug, Clone)]
pub struct Steps<'a> {
    folds: &'a [FoldDescriptor],
    current: Grid,
    next: usize,
}

impl Iterator for Steps<'_> {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        let fold = *self.folds.get(self.next)?;
        let index = self.next;
        self.next += 1;

        self.current = apply_fold(&self.current, &fold);
        let visible = extract(&self.current);
        debug!(index, %fold, %visible, "applied fold");

        let mut step = Step {
            index,
            fold,
            grid: self.current.clone(),
            trace: vec![fold_line(&fold), state_line(&visible)],
        };
        if step.is_last(self.folds.len()) {
            step.trace.push(completion_line(&visible));
        }
        Some(step)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.folds.len() - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Steps<'_> {}

/// Result of an eager run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunOutcome {
    pub grid: Grid,
    pub trace: Trace,
    pub output: String,
}

/// Applies every fold in order and returns the final grid and trace
///
/// An empty sequence returns the initial grid with an empty trace.
pub fn run_sequence(initial: &Grid, sequence: &FoldSequence) -> RunOutcome {
    FoldRun::new(initial.clone(), sequence.clone()).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fold::{Axis, KeepSide};
    use crate::domain::grid::build_grid;

    fn sequence(folds: &[FoldDescriptor]) -> FoldSequence {
        folds.iter().copied().collect()
    }

    #[test]
    fn empty_sequence_returns_initial_grid() {
        let grid = build_grid("HELLOWORLD", 5).unwrap();
        let outcome = run_sequence(&grid, &FoldSequence::new());

        assert_eq!(outcome.grid, grid);
        assert!(outcome.trace.is_empty());
        assert_eq!(outcome.output, "HELLOWORLD");
    }

    #[test]
    fn hello_world_default_horizontal_fold_is_degenerate() {
        let grid = build_grid("HELLOWORLD", 5).unwrap();
        let mut folds = FoldSequence::new();
        let fold = folds.add(Axis::Horizontal, &grid);
        assert_eq!(fold.pivot(), 1);
        assert_eq!(fold.keep(), KeepSide::Down);

        let outcome = run_sequence(&grid, &folds);
        assert_eq!(outcome.grid, grid);
        assert_eq!(outcome.output, "HELLOWORLD");
        assert_eq!(
            outcome.trace.lines(),
            &[
                "INITIATING HORIZONTAL FOLD [POS:1] [KEEP:DOWN]".to_string(),
                "MATRIX STATE: HELLOWORLD".to_string(),
                ">> ENCRYPTION COMPLETE: HELLOWORLD".to_string(),
            ]
        );
    }

    #[test]
    fn trace_has_two_lines_per_fold_plus_completion() {
        let grid = build_grid("ABCDEFGHI", 3).unwrap();
        let folds = sequence(&[
            FoldDescriptor::with_default_keep(Axis::Horizontal, 1),
            FoldDescriptor::with_default_keep(Axis::Vertical, 1),
        ]);

        let outcome = run_sequence(&grid, &folds);
        assert_eq!(outcome.trace.len(), 5);
        assert_eq!(outcome.trace.lines()[1], "MATRIX STATE: DEFHJL");
        // The surviving cell is always visible, so A+C=4 D reappears in row 0
        assert_eq!(outcome.output, "DEJJT");
        assert_eq!(outcome.trace.lines()[4], ">> ENCRYPTION COMPLETE: DEJJT");
    }

    #[test]
    fn stepwise_matches_eager() {
        let grid = build_grid("the quick brown fox jumps over the lazy dog", 6).unwrap();
        let folds = sequence(&[
            FoldDescriptor::with_default_keep(Axis::Vertical, 3),
            FoldDescriptor::with_default_keep(Axis::Horizontal, 3),
            FoldDescriptor::new(Axis::Horizontal, 2, KeepSide::Up).unwrap(),
        ]);
        let run = FoldRun::new(grid.clone(), folds.clone());

        let steps: Vec<Step> = run.steps().collect();
        let eager = run_sequence(&grid, &folds);

        assert_eq!(steps.len(), 3);
        assert_eq!(steps.last().map(|s| &s.grid), Some(&eager.grid));
        let joined: Vec<String> = steps.iter().flat_map(|s| s.trace.clone()).collect();
        assert_eq!(joined, eager.trace.lines());
        assert!(steps[2].is_last(3));
        assert_eq!(steps[2].trace.len(), 3);
        assert_eq!(steps[0].trace.len(), 2);
    }

    #[test]
    fn steps_are_restartable() {
        let grid = build_grid("ABCDEFGHI", 3).unwrap();
        let run = FoldRun::new(
            grid,
            sequence(&[FoldDescriptor::with_default_keep(Axis::Horizontal, 1)]),
        );

        let first: Vec<Step> = run.steps().collect();
        let second: Vec<Step> = run.steps().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn yielded_snapshots_are_independent() {
        let grid = build_grid("ABCDEFGHI", 3).unwrap();
        let fold = FoldDescriptor::with_default_keep(Axis::Horizontal, 1);
        let run = FoldRun::new(grid, sequence(&[fold, fold]));

        let mut steps = run.steps();
        let first = steps.next().unwrap();
        let kept = first.grid.clone();
        let second = steps.next().unwrap();

        assert_eq!(first.grid, kept);
        assert_ne!(first.grid, second.grid);
        assert!(steps.next().is_none());
    }

    #[test]
    fn cancelling_midway_is_just_dropping() {
        let grid = build_grid("ABCDEFGHI", 3).unwrap();
        let fold = FoldDescriptor::with_default_keep(Axis::Vertical, 1);
        let run = FoldRun::new(grid.clone(), sequence(&[fold, fold, fold]));

        let taken: Vec<Step> = run.steps().take(1).collect();
        assert_eq!(taken.len(), 1);
        assert!(!taken[0].trace.iter().any(|l| l.starts_with(">>")));
        assert_eq!(run.initial(), &grid);
    }

    #[test]
    fn order_matters() {
        let grid = build_grid("ABCDEFGHIJKLMNOP", 4).unwrap();
        let h = FoldDescriptor::with_default_keep(Axis::Horizontal, 1);
        let v = FoldDescriptor::with_default_keep(Axis::Vertical, 1);

        let hv = run_sequence(&grid, &sequence(&[h, v]));
        let vh = run_sequence(&grid, &sequence(&[v, h]));
        assert_eq!(hv.trace.lines()[0], "INITIATING HORIZONTAL FOLD [POS:1] [KEEP:DOWN]");
        assert_eq!(vh.trace.lines()[0], "INITIATING VERTICAL FOLD [POS:1] [KEEP:RIGHT]");
        assert_eq!(hv.grid.dimensions(), vh.grid.dimensions());
        assert_eq!(hv.output, "DFLHLXPNBP");
        assert_eq!(vh.output, "FLHJLXPNBP");
        assert_ne!(hv.output, vh.output);
    }

    #[test]
    fn empty_text_runs_to_empty_output() {
        let grid = build_grid("1234", 5).unwrap();
        let mut folds = FoldSequence::new();
        folds.add(Axis::Horizontal, &grid);
        folds.add(Axis::Vertical, &grid);

        let outcome = run_sequence(&grid, &folds);
        assert_eq!(outcome.output, "");
        assert_eq!(outcome.grid, grid);
        assert_eq!(
            outcome.trace.lines().last().map(String::as_str),
            Some(">> ENCRYPTION COMPLETE: ")
        );
    }

    #[test]
    fn size_hint_counts_remaining_steps() {
        let grid = build_grid("ABCDEFGHI", 3).unwrap();
        let fold = FoldDescriptor::with_default_keep(Axis::Vertical, 1);
        let run = FoldRun::new(grid, sequence(&[fold, fold]));

        let mut steps = run.steps();
        assert_eq!(steps.len(), 2);
        steps.next();
        assert_eq!(steps.len(), 1);
    }
}

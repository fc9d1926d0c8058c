//! Session controller
//!
//! The controller owns everything the presentation layer edits: message,
//! configuration, the initial grid, the fold sequence and the results of
//! the last run. It calls into the pure domain functions and never the
//! other way around.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::app::state::{SessionEvent, SessionState, StateMachine};
use crate::config::{CipherConfig, ConfigError};
use crate::domain::fold::{Axis, FoldDescriptor};
use crate::domain::grid::{extract, layout_grid, Grid};
use crate::domain::runner::{FoldRun, RunOutcome, Step, Trace};
use crate::domain::sequence::{FoldRequest, FoldSequence};

/// Errors surfaced by session operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("no fold at position {index} (sequence has {len})")]
    NoSuchFold { index: usize, len: usize },
}

/// Editable fold session
///
/// Rebuilding the grid (new message or width) always clears the fold
/// sequence, so pivots captured against old dimensions are never replayed.
#[derive(Debug, Clone)]
pub struct Session {
    config: CipherConfig,
    text: String,
    /// Grid built from the current message and width
    initial: Grid,
    /// Grid currently on display; the latest snapshot of a run
    display: Grid,
    sequence: FoldSequence,
    state: SessionState,
    trace: Trace,
    output: String,
}

impl Session {
    /// Creates a session with the default message
    pub fn new(config: CipherConfig) -> Self {
        Self::with_text(config, CipherConfig::DEFAULT_TEXT)
    }

    pub fn with_text(config: CipherConfig, text: impl Into<String>) -> Self {
        let text = text.into();
        let initial = layout_grid(&text, config.width());
        Self {
            config,
            text,
            display: initial.clone(),
            initial,
            sequence: FoldSequence::new(),
            state: SessionState::default(),
            trace: Trace::new(),
            output: String::new(),
        }
    }

    pub fn config(&self) -> &CipherConfig {
        &self.config
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn initial_grid(&self) -> &Grid {
        &self.initial
    }

    /// The grid to render right now
    pub fn display_grid(&self) -> &Grid {
        &self.display
    }

    pub fn sequence(&self) -> &FoldSequence {
        &self.sequence
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Output of the last completed run, empty if none since the last rebuild
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Replaces the message and rebuilds the grid
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.rebuild();
    }

    /// Changes the grid width
    ///
    /// An out-of-range width is rejected and the session is left as it was.
    pub fn set_width(&mut self, width: usize) -> Result<(), SessionError> {
        if let Err(err) = self.config.set_width(width) {
            warn!(width, current = self.config.width(), "rejected grid width");
            return Err(err.into());
        }
        self.rebuild();
        Ok(())
    }

    pub fn set_step_delay_ms(&mut self, millis: u64) {
        self.config.set_step_delay_ms(millis);
    }

    fn rebuild(&mut self) {
        // CipherConfig only ever holds a validated width
        self.initial = layout_grid(&self.text, self.config.width());
        self.display = self.initial.clone();
        if !self.sequence.is_empty() {
            info!(dropped = self.sequence.len(), "grid rebuilt, clearing fold sequence");
        }
        self.sequence.clear();
        self.output.clear();
        self.transition(SessionEvent::Edited);

        let (rows, cols) = self.initial.dimensions();
        debug!(rows, cols, "rebuilt grid");
    }

    /// Appends a midpoint fold computed from the current grid
    pub fn add_fold(&mut self, axis: Axis) -> FoldDescriptor {
        let fold = self.sequence.add(axis, &self.initial);
        debug!(%fold, "added fold");
        self.transition(SessionEvent::Edited);
        fold
    }

    /// Appends a fold from a parsed request
    pub fn request_fold(&mut self, request: FoldRequest) -> FoldDescriptor {
        match request {
            FoldRequest::Midpoint(axis) => self.add_fold(axis),
            FoldRequest::Explicit(fold) => {
                self.sequence.push(fold);
                debug!(%fold, "added fold");
                self.transition(SessionEvent::Edited);
                fold
            }
        }
    }

    /// Removes the fold at `index`
    ///
    /// The output of the last run is kept; only a new run reflects the edit.
    pub fn remove_fold(&mut self, index: usize) -> Result<FoldDescriptor, SessionError> {
        let len = self.sequence.len();
        let fold = self
            .sequence
            .remove(index)
            .ok_or(SessionError::NoSuchFold { index, len })?;
        debug!(index, %fold, "removed fold");
        self.transition(SessionEvent::Edited);
        Ok(fold)
    }

    /// Runs the current sequence over the initial grid in one go
    pub fn run(&mut self) -> RunOutcome {
        self.animate(|_| {})
    }

    /// Runs the current sequence one step at a time
    ///
    /// `on_step` is called after each fold with the new snapshot; pacing
    /// (sleeping, redrawing) is entirely up to the caller.
    pub fn animate<F>(&mut self, mut on_step: F) -> RunOutcome
    where
        F: FnMut(&Step),
    {
        info!(folds = self.sequence.len(), "running fold sequence");
        let run = FoldRun::new(self.initial.clone(), self.sequence.clone());

        self.trace = Trace::new();
        self.display = self.initial.clone();
        for step in run.steps() {
            self.transition(SessionEvent::FoldStarted(step.index));
            on_step(&step);
            self.trace.extend(step.trace);
            self.display = step.grid;
        }

        self.output = extract(&self.display);
        self.transition(SessionEvent::RunFinished(self.output.clone()));
        info!(output = %self.output, "fold sequence complete");

        RunOutcome {
            grid: self.display.clone(),
            trace: self.trace.clone(),
            output: self.output.clone(),
        }
    }

    /// Restores the default message and clears folds, output and trace
    ///
    /// The width is kept.
    pub fn reset(&mut self) {
        self.text = CipherConfig::DEFAULT_TEXT.to_string();
        self.rebuild();
        self.trace = Trace::new();
        self.transition(SessionEvent::Reset);
    }

    fn transition(&mut self, event: SessionEvent) {
        let current = std::mem::take(&mut self.state);
        self.state = StateMachine::process_event(current, event);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(CipherConfig::default())
    }
}

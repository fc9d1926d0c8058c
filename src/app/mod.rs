//! Application orchestration layer
//!
//! This module owns the editable session (message, width, folds) on behalf of
//! a presentation layer and drives the pure domain functions.

pub mod controller;
pub mod state;

pub use controller::{Session, SessionError};
pub use state::{SessionEvent, SessionState, StateMachine};

//! Session state management
//!
//! Defines the session state machine and its transitions. The state only
//! tracks playback progress; message, grid and sequence live in the
//! session controller.

/// Playback state of a session
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Inputs are being edited, nothing is playing
    #[default]
    Editing,
    /// A run is in progress and has just started the given fold
    Running { current_fold: usize },
    /// The last run finished with this output
    Complete { output: String },
}

impl SessionState {
    /// Index of the fold currently highlighted, if any
    pub fn current_fold(&self) -> Option<usize> {
        match self {
            SessionState::Running { current_fold } => Some(*current_fold),
            _ => None,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, SessionState::Running { .. })
    }
}

/// Possible state transition events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Message, width or fold sequence was edited
    Edited,
    /// A run started applying the fold at this index
    FoldStarted(usize),
    /// A run finished with this output
    RunFinished(String),
    /// Session reset to defaults
    Reset,
}

/// State machine for session state transitions
pub struct StateMachine;

impl StateMachine {
    /// Processes a state event and returns the new state
    ///
    /// # Arguments
    /// * `current_state` - Current session state
    /// * `event` - Event to process
    ///
    /// # Returns
    /// New session state after processing the event
    pub fn process_event(current_state: SessionState, event: SessionEvent) -> SessionState {
        match (current_state, event) {
            // Edits are ignored while a run is playing
            (state @ SessionState::Running { .. }, SessionEvent::Edited) => state,

            (_, SessionEvent::Edited) => SessionState::Editing,

            (SessionState::Running { current_fold }, SessionEvent::FoldStarted(next))
                if next <= current_fold =>
            {
                SessionState::Running { current_fold }
            }

            (_, SessionEvent::FoldStarted(index)) => SessionState::Running {
                current_fold: index,
            },

            (_, SessionEvent::RunFinished(output)) => SessionState::Complete { output },

            (_, SessionEvent::Reset) => SessionState::Editing,
        }
    }
}

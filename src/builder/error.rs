//! Errors raised while assembling a state machine.

use crate::machine::StateId;
use thiserror::Error;

/// Errors that can occur when building a state machine.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuildError {
    #[error("No states defined. Add at least one state with .state(..)")]
    NoStates,

    #[error("State id '{0}' is defined more than once")]
    DuplicateState(StateId),

    #[error("State '{from}' has a transition to unknown state '{to}'")]
    DanglingTarget { from: StateId, to: StateId },
}

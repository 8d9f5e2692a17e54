//! State machine evaluation errors.

use super::state::StateId;
use thiserror::Error;

/// Errors returned while resolving the next state of a machine.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MachineError {
    #[error("Value does not match any state in the machine")]
    UnknownId,

    #[error("State '{0}' has no address in the machine")]
    UnknownAddress(StateId),

    #[error("No valid transition available from state '{from}'")]
    NoValidTransition { from: StateId },

    #[error("Transition from state '{from}' has an empty target id")]
    EmptyNextId { from: StateId },

    #[error("Target state '{0}' does not exist in the machine")]
    UnknownTarget(StateId),

    #[error("State '{0}' carries no value")]
    EmptyValue(StateId),

    #[error("Machine has no start state")]
    NoStart,

    #[error("No behavior registered for the value of state '{0}'")]
    NoBehavior(StateId),
}

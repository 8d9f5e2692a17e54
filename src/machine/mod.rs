//! Ring-backed state machines with guarded transitions.
//!
//! States are stored in a fixed [`Ring`] and located by the value they carry.
//! Given the current value and a test input, a [`Machine`] resolves the value
//! of the next state. Two flavours share the same core:
//!
//! - [`StateMachine`]: each edge is a single matcher predicate.
//! - [`ConditionalStateMachine`]: each edge is a full
//!   [`Conditional`](crate::conditional::Conditional) gate.
//!
//! Machines are immutable after construction and safe to evaluate from many
//! threads at once. Use a [`Cursor`] to walk one and keep its history.

mod cursor;
mod error;
mod history;
mod ring;
mod state;
mod state_machine;

pub use cursor::Cursor;
pub use error::MachineError;
pub use history::{StateHistory, StateTransition};
pub use ring::{Ring, RingAddress};
pub use state::{
    ConditionalState, ConditionalTransition, Edge, Outcome, SimpleState, State, StateId,
    Transition,
};
pub use state_machine::{
    basic_equals, ConditionalStateMachine, Machine, StateMachine, StepResult,
};

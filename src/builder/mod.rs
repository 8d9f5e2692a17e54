//! Fluent construction of state machines.
//!
//! [`Machine::new`](crate::machine::Machine::new) accepts any list of states,
//! including an empty one. The builder adds the checks a caller usually
//! wants before putting a machine into service.

pub mod error;
pub mod machine;

pub use error::BuildError;
pub use machine::StateMachineBuilder;

//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::machine::{Edge, Machine, State};

/// Builder for constructing state machines with a fluent API.
///
/// The first state added becomes the start state.
///
/// # Example
///
/// ```rust
/// use fielder::builder::{BuildError, StateMachineBuilder};
/// use fielder::machine::{SimpleState, StateMachine};
///
/// let result: Result<StateMachine<u8, str>, _> = StateMachineBuilder::new()
///     .state(SimpleState::new("a", 1).on("missing", |_: &str| true))
///     .validate_targets(true)
///     .build();
///
/// assert!(matches!(result, Err(BuildError::DanglingTarget { .. })));
/// ```
pub struct StateMachineBuilder<V, T> {
    states: Vec<State<V, T>>,
    validate_targets: bool,
}

impl<V: Clone, T: Edge> StateMachineBuilder<V, T> {
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            validate_targets: false,
        }
    }

    /// Add a state. Order is preserved in the ring.
    pub fn state(mut self, state: State<V, T>) -> Self {
        self.states.push(state);
        self
    }

    /// Add multiple states at once.
    pub fn states(mut self, states: impl IntoIterator<Item = State<V, T>>) -> Self {
        self.states.extend(states);
        self
    }

    /// Reject transitions that name a state the machine does not contain.
    ///
    /// Off by default: such transitions then fail at evaluation time with
    /// [`MachineError::UnknownTarget`](crate::machine::MachineError::UnknownTarget).
    pub fn validate_targets(mut self, enabled: bool) -> Self {
        self.validate_targets = enabled;
        self
    }

    /// Build the state machine.
    pub fn build(self) -> Result<Machine<V, T>, BuildError> {
        if self.states.is_empty() {
            return Err(BuildError::NoStates);
        }

        let machine = Machine::new(self.states)?;

        if self.validate_targets {
            if let Some((from, to)) = machine.dangling_targets().into_iter().next() {
                return Err(BuildError::DanglingTarget { from, to });
            }
        }

        Ok(machine)
    }
}

impl<V: Clone, T: Edge> Default for StateMachineBuilder<V, T> {
    fn default() -> Self {
        Self::new()
    }
}

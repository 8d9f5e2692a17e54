//! Walking a machine one input at a time.

use super::error::MachineError;
use super::history::{StateHistory, StateTransition};
use super::state::{Outcome, StateId};
use super::state_machine::{Machine, StepResult};
use chrono::Utc;

/// Tracks the current position in a [`Machine`] and the path taken so far.
///
/// The machine itself is stateless; a cursor is the caller-side holder of
/// "where am I". Any number of cursors can share one machine.
///
/// # Example
///
/// ```rust
/// use fielder::machine::{Cursor, SimpleState, StateMachine};
///
/// let machine: StateMachine<u8, str> = StateMachine::new(vec![
///     SimpleState::new("a", 1).on("b", |i: &str| i == "go"),
///     SimpleState::new("b", 2).as_terminal(),
/// ])
/// .unwrap();
///
/// let mut cursor = Cursor::from_start(&machine).unwrap();
/// cursor.advance("go").unwrap();
/// assert_eq!(*cursor.value(), 2);
/// assert_eq!(cursor.history().len(), 1);
/// ```
pub struct Cursor<'m, V, T> {
    machine: &'m Machine<V, T>,
    state: StateId,
    value: V,
    attempts: usize,
    history: StateHistory<V>,
}

impl<'m, V: Clone, T> Cursor<'m, V, T> {
    /// Place a cursor on the state named `state`.
    pub fn new(machine: &'m Machine<V, T>, state: impl Into<StateId>) -> Result<Self, MachineError> {
        let state = state.into();
        let value = machine
            .value_of(&state)?
            .ok_or_else(|| MachineError::EmptyValue(state.clone()))?;
        Ok(Self {
            machine,
            state,
            value,
            attempts: 0,
            history: StateHistory::new(),
        })
    }

    /// Place a cursor on the machine's start state.
    pub fn from_start(machine: &'m Machine<V, T>) -> Result<Self, MachineError> {
        let start = machine.start().ok_or(MachineError::NoStart)?;
        Self::new(machine, start)
    }

    /// Evaluate `input` from the current state and move if it names another state.
    ///
    /// Failed and unchanged evaluations count as attempts but leave the
    /// cursor where it is.
    pub fn advance<I>(&mut self, input: &I) -> Result<StepResult<V>, MachineError>
    where
        I: ?Sized,
        T: Outcome<I>,
    {
        self.attempts += 1;
        let (next, step) = self.machine.resolve_from_id(&self.state, input)?;

        if step.is_transition() {
            let from = std::mem::replace(&mut self.state, next.clone());
            self.value = step.value().clone();
            self.history = self.history.record(StateTransition {
                from,
                to: next,
                value: self.value.clone(),
                timestamp: Utc::now(),
                attempt: self.attempts,
            });
            self.attempts = 0;
        }

        Ok(step)
    }

    pub fn state(&self) -> &StateId {
        &self.state
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    /// Evaluations made since the cursor last moved.
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    pub fn history(&self) -> &StateHistory<V> {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::state::SimpleState;
    use crate::machine::StateMachine;

    fn review_flow() -> StateMachine<&'static str, str> {
        StateMachine::new(vec![
            SimpleState::new("draft", "Draft").on("review", |i: &str| i == "submit"),
            SimpleState::new("review", "In review")
                .on("draft", |i: &str| i == "reject")
                .on("published", |i: &str| i == "approve"),
            SimpleState::new("published", "Published").as_terminal(),
        ])
        .unwrap()
    }

    #[test]
    fn walks_the_machine_and_records_history() {
        let machine = review_flow();
        let mut cursor = Cursor::from_start(&machine).unwrap();

        for input in ["submit", "reject", "submit", "approve"] {
            assert!(cursor.advance(input).unwrap().is_transition());
        }

        assert_eq!(cursor.state().as_str(), "published");
        assert_eq!(*cursor.value(), "Published");
        let path: Vec<&str> = cursor.history().get_path().iter().map(|id| id.as_str()).collect();
        assert_eq!(path, vec!["draft", "review", "draft", "review", "published"]);
    }

    #[test]
    fn failed_inputs_count_as_attempts() {
        let machine = review_flow();
        let mut cursor = Cursor::from_start(&machine).unwrap();

        assert!(cursor.advance("approve").is_err());
        assert!(cursor.advance("reject").is_err());
        assert_eq!(cursor.attempts(), 2);
        assert_eq!(cursor.state().as_str(), "draft");

        cursor.advance("submit").unwrap();
        assert_eq!(cursor.attempts(), 0);
        assert_eq!(cursor.history().last().map(|t| t.attempt), Some(3));
    }

    #[test]
    fn terminal_state_does_not_record() {
        let machine = review_flow();
        let mut cursor = Cursor::new(&machine, "published").unwrap();

        assert_eq!(cursor.advance("anything"), Ok(StepResult::Unchanged("Published")));
        assert!(cursor.history().is_empty());
    }

    #[test]
    fn unknown_or_missing_start_is_rejected() {
        let machine = review_flow();
        assert!(matches!(
            Cursor::new(&machine, "ghost"),
            Err(MachineError::UnknownTarget(_))
        ));

        let empty: StateMachine<u8, str> = StateMachine::new(Vec::new()).unwrap();
        assert!(matches!(Cursor::from_start(&empty), Err(MachineError::NoStart)));
    }
}

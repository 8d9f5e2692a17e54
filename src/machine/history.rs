//! Record of the steps a [`Cursor`](super::Cursor) has taken.

use super::state::StateId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One move between two states.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateTransition<V> {
    pub from: StateId,
    pub to: StateId,
    /// Payload of the target state.
    pub value: V,
    pub timestamp: DateTime<Utc>,
    /// Evaluations made from `from` before this one succeeded, counting this one.
    pub attempt: usize,
}

/// Ordered, append-only list of transitions.
///
/// `record` returns a new history and leaves the receiver untouched.
///
/// # Example
///
/// ```rust
/// use chrono::Utc;
/// use fielder::machine::{StateHistory, StateId, StateTransition};
///
/// let history = StateHistory::new().record(StateTransition {
///     from: StateId::from("draft"),
///     to: StateId::from("review"),
///     value: 2,
///     timestamp: Utc::now(),
///     attempt: 1,
/// });
///
/// let path: Vec<&str> = history.get_path().iter().map(|id| id.as_str()).collect();
/// assert_eq!(path, vec!["draft", "review"]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StateHistory<V> {
    transitions: Vec<StateTransition<V>>,
}

impl<V> Default for StateHistory<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> StateHistory<V> {
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    pub fn record(&self, transition: StateTransition<V>) -> Self
    where
        V: Clone,
    {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// Ids visited in order: the first origin, then every target.
    pub fn get_path(&self) -> Vec<&StateId> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        path.extend(self.transitions.iter().map(|t| &t.to));
        path
    }

    /// Time between the first and last transition.
    pub fn duration(&self) -> Option<Duration> {
        let first = self.transitions.first()?;
        let last = self.transitions.last()?;
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn last(&self) -> Option<&StateTransition<V>> {
        self.transitions.last()
    }

    /// How many times the history entered `id`.
    pub fn visits(&self, id: &StateId) -> usize {
        self.transitions.iter().filter(|t| &t.to == id).count()
    }

    pub fn transitions(&self) -> &[StateTransition<V>] {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(from: &str, to: &str, value: u8, timestamp: DateTime<Utc>) -> StateTransition<u8> {
        StateTransition {
            from: StateId::from(from),
            to: StateId::from(to),
            value,
            timestamp,
            attempt: 1,
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history: StateHistory<u8> = StateHistory::new();
        assert!(history.is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
        assert!(history.last().is_none());
    }

    #[test]
    fn record_leaves_receiver_untouched() {
        let history = StateHistory::new();
        let next = history.record(step("a", "b", 2, Utc::now()));

        assert_eq!(history.len(), 0);
        assert_eq!(next.len(), 1);
        assert_eq!(next.last().map(|t| t.value), Some(2));
    }

    #[test]
    fn path_and_visits_follow_transitions() {
        let now = Utc::now();
        let history = StateHistory::new()
            .record(step("a", "b", 2, now))
            .record(step("b", "a", 1, now))
            .record(step("a", "b", 2, now));

        let path: Vec<&str> = history.get_path().iter().map(|id| id.as_str()).collect();
        assert_eq!(path, vec!["a", "b", "a", "b"]);
        assert_eq!(history.visits(&StateId::from("b")), 2);
        assert_eq!(history.visits(&StateId::from("c")), 0);
    }

    #[test]
    fn duration_spans_first_to_last() {
        let start = Utc::now();
        let history = StateHistory::new()
            .record(step("a", "b", 2, start))
            .record(step("b", "c", 3, start + chrono::Duration::milliseconds(250)));

        assert_eq!(history.duration(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn history_serializes_correctly() {
        let history = StateHistory::new().record(step("a", "b", 2, Utc::now()));

        let json = serde_json::to_string(&history).unwrap();
        let restored: StateHistory<u8> = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.transitions(), history.transitions());
    }
}

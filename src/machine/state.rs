//! States and the guarded transitions between them.

use super::error::MachineError;
use crate::conditional::{Conditional, Guard};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier states use to refer to each other.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateId(String);

impl StateId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StateId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for StateId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// An outbound edge of a state.
pub trait Edge {
    fn next_state(&self) -> &StateId;
}

/// An edge that can decide whether it applies to a test input.
pub trait Outcome<I: ?Sized>: Edge {
    fn permits(&self, input: &I) -> bool;
}

/// Edge guarded by a single matcher predicate.
pub struct Transition<I: ?Sized> {
    next_state: StateId,
    matcher: Guard<I>,
}

impl<I: ?Sized> Transition<I> {
    pub fn new(next_state: impl Into<StateId>, matcher: Guard<I>) -> Self {
        Self {
            next_state: next_state.into(),
            matcher,
        }
    }

    pub fn when<F>(next_state: impl Into<StateId>, matcher: F) -> Self
    where
        F: Fn(&I) -> bool + Send + Sync + 'static,
    {
        Self::new(next_state, Guard::new(matcher))
    }
}

impl<I: ?Sized> Edge for Transition<I> {
    fn next_state(&self) -> &StateId {
        &self.next_state
    }
}

impl<I: ?Sized> Outcome<I> for Transition<I> {
    fn permits(&self, input: &I) -> bool {
        self.matcher.check(input)
    }
}

/// Edge guarded by a full [`Conditional`] gate evaluated against the input.
pub struct ConditionalTransition<I: ?Sized> {
    next_state: StateId,
    conditional: Conditional<I>,
}

impl<I: ?Sized> ConditionalTransition<I> {
    pub fn new(next_state: impl Into<StateId>, conditional: Conditional<I>) -> Self {
        Self {
            next_state: next_state.into(),
            conditional,
        }
    }

    pub fn conditional(&self) -> &Conditional<I> {
        &self.conditional
    }
}

impl<I: ?Sized> Edge for ConditionalTransition<I> {
    fn next_state(&self) -> &StateId {
        &self.next_state
    }
}

impl<I: ?Sized> Outcome<I> for ConditionalTransition<I> {
    fn permits(&self, input: &I) -> bool {
        self.conditional.meets(input)
    }
}

/// A named point in a machine carrying a payload value and ordered edges.
///
/// Edges of one state are expected to be mutually exclusive; the first edge
/// that permits the input wins.
pub struct State<V, T> {
    id: StateId,
    outcomes: Vec<T>,
    value: Option<V>,
    start: bool,
    terminal: bool,
}

/// State whose edges are simple matchers.
pub type SimpleState<V, I> = State<V, Transition<I>>;

/// State whose edges are conditional gates.
pub type ConditionalState<V, I> = State<V, ConditionalTransition<I>>;

impl<V, T> State<V, T> {
    pub fn new(id: impl Into<StateId>, value: V) -> Self {
        Self {
            id: id.into(),
            outcomes: Vec::new(),
            value: Some(value),
            start: false,
            terminal: false,
        }
    }

    /// A state without a payload. Resolving to it fails with
    /// [`MachineError::EmptyValue`].
    pub fn placeholder(id: impl Into<StateId>) -> Self {
        Self {
            id: id.into(),
            outcomes: Vec::new(),
            value: None,
            start: false,
            terminal: false,
        }
    }

    pub fn as_start(mut self) -> Self {
        self.start = true;
        self
    }

    /// Mark the state terminal: evaluating it always resolves to itself.
    pub fn as_terminal(mut self) -> Self {
        self.terminal = true;
        self
    }

    pub fn outcome(mut self, outcome: T) -> Self {
        self.outcomes.push(outcome);
        self
    }

    pub fn id(&self) -> &StateId {
        &self.id
    }

    pub fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    pub fn outcomes(&self) -> &[T] {
        &self.outcomes
    }

    pub fn is_start(&self) -> bool {
        self.start
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// Resolve the id of the next state for `input`.
    pub fn evaluate_transition<I: ?Sized>(&self, input: &I) -> Result<StateId, MachineError>
    where
        T: Outcome<I>,
    {
        if self.terminal {
            return Ok(self.id.clone());
        }
        self.outcomes
            .iter()
            .find(|outcome| outcome.permits(input))
            .map(|outcome| outcome.next_state().clone())
            .ok_or_else(|| MachineError::NoValidTransition {
                from: self.id.clone(),
            })
    }
}

impl<V, I: ?Sized> State<V, Transition<I>> {
    /// Add an edge to `next_state` taken when `matcher` accepts the input.
    pub fn on<F>(self, next_state: impl Into<StateId>, matcher: F) -> Self
    where
        F: Fn(&I) -> bool + Send + Sync + 'static,
    {
        self.outcome(Transition::when(next_state, matcher))
    }
}

impl<V, I: ?Sized> State<V, ConditionalTransition<I>> {
    /// Add an edge to `next_state` taken when `conditional` approves the input.
    pub fn on_conditions(self, next_state: impl Into<StateId>, conditional: Conditional<I>) -> Self {
        self.outcome(ConditionalTransition::new(next_state, conditional))
    }
}

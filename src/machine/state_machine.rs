//! Ring-backed state machines.

use super::error::MachineError;
use super::ring::{Ring, RingAddress};
use super::state::{ConditionalTransition, Edge, Outcome, State, StateId, Transition};
use crate::builder::BuildError;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::hash::Hash;

/// Result of resolving the next state.
#[derive(Clone, Debug, PartialEq)]
pub enum StepResult<V> {
    /// The machine moved to a different state carrying this value.
    Transitioned(V),

    /// The input was valid but the state did not change (a terminal state or
    /// an explicit self-edge). Carries the current state's value.
    Unchanged(V),
}

impl<V> StepResult<V> {
    pub fn value(&self) -> &V {
        match self {
            Self::Transitioned(value) | Self::Unchanged(value) => value,
        }
    }

    pub fn into_value(self) -> V {
        match self {
            Self::Transitioned(value) | Self::Unchanged(value) => value,
        }
    }

    pub fn is_transition(&self) -> bool {
        matches!(self, Self::Transitioned(_))
    }
}

/// Equality for payloads that implement `PartialEq`.
pub fn basic_equals<V: PartialEq>(left: &V, right: &V) -> bool {
    left == right
}

struct Topology<V, T> {
    ring: Ring<State<V, T>>,
    start: Option<StateId>,
    addresses: HashMap<StateId, RingAddress>,
    values: HashMap<StateId, Option<V>>,
}

impl<V, T> Topology<V, T> {
    /// Scan payloads in ring order so duplicate payloads resolve to the
    /// first state that carries them.
    fn lookup_value_id<F>(&self, value: &V, equals: &F) -> Option<&StateId>
    where
        F: Fn(&V, &V) -> bool,
    {
        self.ring
            .iter()
            .map(|(_, state)| state)
            .find(|state| state.value().is_some_and(|v| equals(v, value)))
            .map(|state| state.id())
    }
}

/// A fixed topology of states stored in a ring.
///
/// The machine is built once and never modified: to change the topology,
/// build a new machine. Evaluation only takes the read side of the lock, so
/// concurrent evaluations never block each other.
///
/// # Example
///
/// ```rust
/// use fielder::machine::{basic_equals, SimpleState, StateMachine, StepResult};
///
/// let machine: StateMachine<&str, str> = StateMachine::new(vec![
///     SimpleState::new("a", "A").on("b", |i: &str| i == "go"),
///     SimpleState::new("b", "B").on("c", |i: &str| i == "go"),
///     SimpleState::new("c", "C").as_terminal(),
/// ])
/// .unwrap();
///
/// assert_eq!(
///     machine.process_in_machine(&"A", "go", basic_equals).unwrap(),
///     StepResult::Transitioned("B")
/// );
/// assert_eq!(
///     machine.process_in_machine(&"C", "go", basic_equals).unwrap(),
///     StepResult::Unchanged("C")
/// );
/// assert!(machine.process_in_machine(&"A", "stop", basic_equals).is_err());
/// ```
pub struct Machine<V, T> {
    inner: RwLock<Topology<V, T>>,
}

/// Machine whose edges are simple matchers over the test input.
pub type StateMachine<V, I> = Machine<V, Transition<I>>;

/// Machine whose edges are conditional gates over the test input.
pub type ConditionalStateMachine<V, I> = Machine<V, ConditionalTransition<I>>;

impl<V: Clone, T> Machine<V, T> {
    /// Build a machine from an ordered list of states.
    ///
    /// The first state becomes the start state. An empty list builds an
    /// empty machine in which every lookup fails. Repeated ids are rejected.
    pub fn new(states: Vec<State<V, T>>) -> Result<Self, BuildError> {
        let mut addresses = HashMap::with_capacity(states.len());
        let mut values = HashMap::with_capacity(states.len());
        let start = states.first().map(|s| s.id().clone());

        for (index, state) in states.iter().enumerate() {
            if index > 0 && state.is_start() {
                tracing::warn!(state = %state.id(), "start flag ignored on a state that is not first");
            }
            if values
                .insert(state.id().clone(), state.value().cloned())
                .is_some()
            {
                return Err(BuildError::DuplicateState(state.id().clone()));
            }
        }

        let ring = Ring::new(states);
        for (address, state) in ring.iter() {
            addresses.insert(state.id().clone(), address);
        }

        tracing::debug!(states = ring.len(), start = ?start, "built state machine");

        Ok(Self {
            inner: RwLock::new(Topology {
                ring,
                start,
                addresses,
                values,
            }),
        })
    }

    /// Resolve the state that follows the one carrying `current`.
    ///
    /// `equals` identifies the current state by its payload, so payloads do
    /// not need to implement `PartialEq`.
    pub fn process_in_machine<I, F>(
        &self,
        current: &V,
        input: &I,
        equals: F,
    ) -> Result<StepResult<V>, MachineError>
    where
        I: ?Sized,
        T: Outcome<I>,
        F: Fn(&V, &V) -> bool,
    {
        self.resolve(current, input, &equals).map(|(_, step)| step)
    }

    fn resolve<I, F>(
        &self,
        current: &V,
        input: &I,
        equals: &F,
    ) -> Result<(StateId, StepResult<V>), MachineError>
    where
        I: ?Sized,
        T: Outcome<I>,
        F: Fn(&V, &V) -> bool,
    {
        let topology = self.inner.read();
        let id = topology
            .lookup_value_id(current, equals)
            .ok_or(MachineError::UnknownId)?;
        Self::step(&topology, id, input)
    }

    /// Resolve the state that follows the state named `id`.
    pub(super) fn resolve_from_id<I>(
        &self,
        id: &StateId,
        input: &I,
    ) -> Result<(StateId, StepResult<V>), MachineError>
    where
        I: ?Sized,
        T: Outcome<I>,
    {
        let topology = self.inner.read();
        Self::step(&topology, id, input)
    }

    fn step<I>(
        topology: &Topology<V, T>,
        id: &StateId,
        input: &I,
    ) -> Result<(StateId, StepResult<V>), MachineError>
    where
        I: ?Sized,
        T: Outcome<I>,
    {
        let address = topology
            .addresses
            .get(id)
            .copied()
            .ok_or_else(|| MachineError::UnknownAddress(id.clone()))?;
        let state = topology
            .ring
            .get(address)
            .ok_or_else(|| MachineError::UnknownAddress(id.clone()))?;

        let next = state.evaluate_transition(input)?;
        if next.is_empty() {
            return Err(MachineError::EmptyNextId { from: id.clone() });
        }
        tracing::trace!(from = %id, to = %next, "evaluated transition");

        let value = topology
            .values
            .get(&next)
            .ok_or_else(|| MachineError::UnknownTarget(next.clone()))?
            .clone()
            .ok_or_else(|| MachineError::EmptyValue(next.clone()))?;

        let step = if &next == id {
            StepResult::Unchanged(value)
        } else {
            StepResult::Transitioned(value)
        };
        Ok((next, step))
    }

    /// Resolve the next state and look up the behavior registered for its value.
    pub fn next_behavior<'b, I, B>(
        &self,
        current: &V,
        input: &I,
        behaviors: &'b HashMap<V, B>,
    ) -> Result<(StepResult<V>, &'b B), MachineError>
    where
        V: Eq + Hash,
        I: ?Sized,
        T: Outcome<I>,
    {
        let (next, step) = self.resolve(current, input, &basic_equals)?;
        let behavior = behaviors
            .get(step.value())
            .ok_or(MachineError::NoBehavior(next))?;
        Ok((step, behavior))
    }

    pub fn start(&self) -> Option<StateId> {
        self.inner.read().start.clone()
    }

    /// Value of the start state.
    pub fn start_value(&self) -> Result<V, MachineError> {
        let start = self.start().ok_or(MachineError::NoStart)?;
        self.value_of(&start)?
            .ok_or(MachineError::EmptyValue(start))
    }

    /// Cached value of a state: `Ok(None)` for a placeholder state.
    pub fn value_of(&self, id: &StateId) -> Result<Option<V>, MachineError> {
        self.inner
            .read()
            .values
            .get(id)
            .cloned()
            .ok_or_else(|| MachineError::UnknownTarget(id.clone()))
    }

    pub fn contains(&self, id: &StateId) -> bool {
        self.inner.read().addresses.contains_key(id)
    }

    pub fn address_of(&self, id: &StateId) -> Option<RingAddress> {
        self.inner.read().addresses.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.inner.read().ring.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().ring.is_empty()
    }

    /// State ids in ring order, beginning at the start state.
    pub fn state_ids(&self) -> Vec<StateId> {
        let topology = self.inner.read();
        let mut ids = Vec::with_capacity(topology.ring.len());
        let mut address = topology.ring.addresses().next();
        while let Some(current) = address {
            let Some(state) = topology.ring.get(current) else {
                break;
            };
            ids.push(state.id().clone());
            address = topology
                .ring
                .next(current)
                .filter(|next| next.index() != 0);
        }
        ids
    }

    /// Target ids that do not name a state of this machine, as `(from, to)` pairs.
    pub fn dangling_targets(&self) -> Vec<(StateId, StateId)>
    where
        T: Edge,
    {
        let topology = self.inner.read();
        let addresses = &topology.addresses;
        topology
            .ring
            .iter()
            .flat_map(|(_, state)| {
                state
                    .outcomes()
                    .iter()
                    .filter(move |edge| !addresses.contains_key(edge.next_state()))
                    .map(move |edge| (state.id().clone(), edge.next_state().clone()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conditional::{Conditional, Guard, Prerequisite};
    use crate::machine::state::{ConditionalState, SimpleState};

    fn abc() -> StateMachine<&'static str, str> {
        StateMachine::new(vec![
            SimpleState::new("a", "A").on("b", |i: &str| i == "go"),
            SimpleState::new("b", "B").on("c", |i: &str| i == "go"),
            SimpleState::new("c", "C").as_terminal(),
        ])
        .unwrap()
    }

    #[test]
    fn moves_along_matching_edges() {
        let machine = abc();
        assert_eq!(
            machine.process_in_machine(&"A", "go", basic_equals),
            Ok(StepResult::Transitioned("B"))
        );
        assert_eq!(
            machine.process_in_machine(&"B", "go", basic_equals),
            Ok(StepResult::Transitioned("C"))
        );
    }

    #[test]
    fn terminal_state_reports_unchanged() {
        let machine = abc();
        let step = machine.process_in_machine(&"C", "go", basic_equals).unwrap();
        assert_eq!(step, StepResult::Unchanged("C"));
        assert!(!step.is_transition());
    }

    #[test]
    fn unmatched_input_has_no_transition() {
        let machine = abc();
        assert_eq!(
            machine.process_in_machine(&"A", "stop", basic_equals),
            Err(MachineError::NoValidTransition {
                from: StateId::from("a")
            })
        );
    }

    #[test]
    fn unknown_value_fails() {
        let machine = abc();
        assert_eq!(
            machine.process_in_machine(&"Z", "go", basic_equals),
            Err(MachineError::UnknownId)
        );
    }

    #[test]
    fn explicit_self_edge_reports_unchanged() {
        let machine: StateMachine<i32, str> = StateMachine::new(vec![
            SimpleState::new("idle", 0)
                .on("idle", |i: &str| i == "tick")
                .on("busy", |i: &str| i == "work"),
            SimpleState::new("busy", 1).on("idle", |_: &str| true),
        ])
        .unwrap();

        assert_eq!(
            machine.process_in_machine(&0, "tick", basic_equals),
            Ok(StepResult::Unchanged(0))
        );
        assert_eq!(
            machine.process_in_machine(&0, "work", basic_equals),
            Ok(StepResult::Transitioned(1))
        );
    }

    #[test]
    fn dangling_target_fails_at_evaluation() {
        let machine: StateMachine<i32, str> =
            StateMachine::new(vec![SimpleState::new("a", 1).on("ghost", |_: &str| true)]).unwrap();

        assert_eq!(
            machine.process_in_machine(&1, "x", basic_equals),
            Err(MachineError::UnknownTarget(StateId::from("ghost")))
        );
        assert_eq!(
            machine.dangling_targets(),
            vec![(StateId::from("a"), StateId::from("ghost"))]
        );
    }

    #[test]
    fn placeholder_target_fails() {
        let machine: StateMachine<i32, str> = StateMachine::new(vec![
            SimpleState::new("a", 1).on("p", |_: &str| true),
            SimpleState::placeholder("p"),
        ])
        .unwrap();

        assert_eq!(
            machine.process_in_machine(&1, "x", basic_equals),
            Err(MachineError::EmptyValue(StateId::from("p")))
        );
    }

    #[test]
    fn empty_target_id_fails() {
        let machine: StateMachine<i32, str> =
            StateMachine::new(vec![SimpleState::new("a", 1).on("", |_: &str| true)]).unwrap();

        assert_eq!(
            machine.process_in_machine(&1, "x", basic_equals),
            Err(MachineError::EmptyNextId {
                from: StateId::from("a")
            })
        );
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let result: Result<StateMachine<i32, str>, _> = StateMachine::new(vec![
            SimpleState::new("a", 1),
            SimpleState::new("a", 2),
        ]);
        assert!(matches!(result, Err(BuildError::DuplicateState(id)) if id.as_str() == "a"));
    }

    #[test]
    fn empty_machine_rejects_every_lookup() {
        let machine: StateMachine<i32, str> = StateMachine::new(Vec::new()).unwrap();
        assert!(machine.is_empty());
        assert_eq!(machine.start(), None);
        assert_eq!(machine.start_value(), Err(MachineError::NoStart));
        assert_eq!(
            machine.process_in_machine(&1, "x", basic_equals),
            Err(MachineError::UnknownId)
        );
    }

    #[test]
    fn custom_equality_resolves_payloads() {
        let machine: StateMachine<String, str> = StateMachine::new(vec![
            SimpleState::new("draft", "Draft".to_string()).on("live", |i: &str| i == "publish"),
            SimpleState::new("live", "Live".to_string()).as_terminal(),
        ])
        .unwrap();

        let step = machine
            .process_in_machine(&"DRAFT".to_string(), "publish", |a: &String, b: &String| {
                a.eq_ignore_ascii_case(b)
            })
            .unwrap();
        assert_eq!(step.into_value(), "Live");
    }

    #[test]
    fn introspection_follows_ring_order() {
        let machine = abc();
        assert_eq!(machine.len(), 3);
        assert_eq!(machine.start(), Some(StateId::from("a")));
        assert_eq!(machine.start_value(), Ok("A"));
        assert_eq!(
            machine.state_ids(),
            vec![StateId::from("a"), StateId::from("b"), StateId::from("c")]
        );
        assert_eq!(machine.value_of(&StateId::from("b")), Ok(Some("B")));
        assert!(machine.contains(&StateId::from("c")));
        assert_eq!(machine.address_of(&StateId::from("c")).map(|a| a.index()), Some(2));
    }

    #[test]
    fn next_behavior_maps_resolved_value() {
        let machine = abc();
        let behaviors: HashMap<&str, &str> = HashMap::from([("B", "notify"), ("C", "archive")]);

        let (step, behavior) = machine.next_behavior(&"A", "go", &behaviors).unwrap();
        assert_eq!(step, StepResult::Transitioned("B"));
        assert_eq!(*behavior, "notify");
    }

    #[test]
    fn next_behavior_requires_registration() {
        let machine = abc();
        let behaviors: HashMap<&str, &str> = HashMap::from([("C", "archive")]);

        assert_eq!(
            machine.next_behavior(&"A", "go", &behaviors),
            Err(MachineError::NoBehavior(StateId::from("b")))
        );
    }

    #[test]
    fn conditional_machine_requires_passing_gate() {
        let guarded = Conditional::new(vec![Prerequisite::when(|input: &str| input.starts_with("go"))
            .require_pred(|input: &str| input.ends_with("!"), "emphatic")]);
        let machine: ConditionalStateMachine<&str, str> = ConditionalStateMachine::new(vec![
            ConditionalState::new("a", "A").on_conditions("b", guarded),
            ConditionalState::new("b", "B").on_conditions(
                "c",
                Conditional::new(vec![
                    Prerequisite::when(|_: &str| true).require(Guard::always())
                ]),
            ),
            ConditionalState::new("c", "C").as_terminal(),
        ])
        .unwrap();

        assert_eq!(
            machine.process_in_machine(&"A", "go!", basic_equals),
            Ok(StepResult::Transitioned("B"))
        );
        assert_eq!(
            machine.process_in_machine(&"A", "go", basic_equals),
            Err(MachineError::NoValidTransition {
                from: StateId::from("a")
            })
        );
        assert_eq!(
            machine.process_in_machine(&"B", "anything", basic_equals),
            Ok(StepResult::Transitioned("C"))
        );
    }

    #[test]
    fn concurrent_evaluation_is_consistent() {
        let machine = abc();
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    scope.spawn(|| {
                        (0..100)
                            .map(|_| machine.process_in_machine(&"A", "go", basic_equals))
                            .all(|r| r == Ok(StepResult::Transitioned("B")))
                    })
                })
                .collect();
            for handle in handles {
                assert!(handle.join().unwrap());
            }
        });
    }
}

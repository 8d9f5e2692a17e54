//! Conditional gates: ordered prerequisites that approve or withhold a change.

use super::guard::Guard;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// One rule of a gate: a candidacy test plus the gauntlet of guards that
/// must all pass whenever the candidacy test matches.
///
/// # Example
///
/// ```rust
/// use fielder::conditional::{Conditional, Prerequisite};
///
/// // Amounts above 100 need a round number.
/// let gate = Conditional::new(vec![Prerequisite::when(|n: &i64| *n > 100)
///     .require_pred(|n: &i64| n % 10 == 0, "multiple of ten")]);
///
/// assert!(gate.meets(&50));
/// assert!(gate.meets(&120));
/// assert!(!gate.meets(&125));
/// ```
pub struct Prerequisite<T: ?Sized> {
    is_candidate: Guard<T>,
    gauntlet: Vec<Guard<T>>,
}

impl<T: ?Sized> Prerequisite<T> {
    pub fn new(is_candidate: Guard<T>, gauntlet: Vec<Guard<T>>) -> Self {
        Self {
            is_candidate,
            gauntlet,
        }
    }

    /// Start a prerequisite that applies whenever `predicate` matches.
    pub fn when<F>(predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self::new(Guard::new(predicate), Vec::new())
    }

    /// Append a guard to the gauntlet.
    pub fn require(mut self, guard: Guard<T>) -> Self {
        self.gauntlet.push(guard);
        self
    }

    /// Append a labeled predicate to the gauntlet.
    pub fn require_pred<F>(self, predicate: F, label: impl Into<String>) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.require(Guard::labeled(label, predicate))
    }

    pub fn is_candidate(&self, candidate: &T) -> bool {
        self.is_candidate.check(candidate)
    }

    pub fn gauntlet(&self) -> &[Guard<T>] {
        &self.gauntlet
    }
}

impl<T: ?Sized> Clone for Prerequisite<T> {
    fn clone(&self) -> Self {
        Self {
            is_candidate: self.is_candidate.clone(),
            gauntlet: self.gauntlet.clone(),
        }
    }
}

/// A guard of an active prerequisite that rejected the candidate.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("Guard '{label}' (prerequisite {prerequisite}, guard {guard}) rejected the candidate")]
pub struct GateViolation {
    pub prerequisite: usize,
    pub guard: usize,
    pub label: String,
}

/// Ordered set of prerequisites guarding a value change.
///
/// The gate approves by default. It rejects only when a prerequisite whose
/// candidacy test matches has a gauntlet guard that fails. Candidacy tests of
/// one gate are expected to be mutually exclusive; this is not enforced, but
/// overlaps are logged when detected.
pub struct Conditional<T: ?Sized> {
    prereqs: Vec<Prerequisite<T>>,
}

impl<T: ?Sized> Conditional<T> {
    pub fn new(prereqs: Vec<Prerequisite<T>>) -> Self {
        Self { prereqs }
    }

    /// A gate with no prerequisites, which approves everything.
    pub fn open() -> Self {
        Self::new(Vec::new())
    }

    pub fn prerequisites(&self) -> &[Prerequisite<T>] {
        &self.prereqs
    }

    /// Decide whether `candidate` may be applied.
    ///
    /// Stops at the first failing guard.
    pub fn meets(&self, candidate: &T) -> bool {
        let mut active = 0usize;
        for (index, prereq) in self.prereqs.iter().enumerate() {
            if !prereq.is_candidate(candidate) {
                continue;
            }
            active += 1;
            if active == 2 {
                tracing::warn!(
                    prerequisite = index,
                    "more than one prerequisite is active for the same candidate"
                );
            }
            if !prereq.gauntlet.iter().all(|guard| guard.check(candidate)) {
                return false;
            }
        }
        true
    }

    /// Indices of the prerequisites whose candidacy test matches `candidate`.
    pub fn active_prerequisites(&self, candidate: &T) -> Vec<usize> {
        self.prereqs
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_candidate(candidate))
            .map(|(i, _)| i)
            .collect()
    }

    /// Run every guard of every active prerequisite, accumulating ALL
    /// rejections instead of stopping at the first one.
    ///
    /// Succeeds exactly when [`Conditional::meets`] returns true.
    pub fn audit(&self, candidate: &T) -> Validation<(), NonEmptyVec<GateViolation>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<GateViolation>>> = Vec::new();

        for (p_index, prereq) in self.prereqs.iter().enumerate() {
            if !prereq.is_candidate(candidate) {
                continue;
            }
            for (g_index, guard) in prereq.gauntlet.iter().enumerate() {
                let check = if guard.check(candidate) {
                    Validation::success(())
                } else {
                    Validation::fail(GateViolation {
                        prerequisite: p_index,
                        guard: g_index,
                        label: guard.label().unwrap_or("unlabeled guard").to_string(),
                    })
                };
                checks.push(check);
            }
        }

        Validation::all_vec(checks).map(|_| ())
    }
}

impl<T: ?Sized> Clone for Conditional<T> {
    fn clone(&self) -> Self {
        Self {
            prereqs: self.prereqs.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejecting_x() -> Conditional<str> {
        Conditional::new(vec![Prerequisite::when(|s: &str| s == "X").require(Guard::never())])
    }

    #[test]
    fn matched_failing_guard_rejects() {
        let gate = rejecting_x();
        assert!(!gate.meets("X"));
        assert!(gate.meets("Y"));
    }

    #[test]
    fn empty_gate_approves() {
        let gate: Conditional<str> = Conditional::open();
        assert!(gate.meets("anything"));
        assert!(gate.audit("anything").is_success());
    }

    #[test]
    fn non_candidate_guards_are_irrelevant() {
        let gate = Conditional::new(vec![
            Prerequisite::when(|n: &i64| *n < 0).require(Guard::never()),
            Prerequisite::when(|n: &i64| *n >= 0).require(Guard::always()),
        ]);
        assert!(gate.meets(&5));
        assert!(!gate.meets(&-5));
    }

    #[test]
    fn all_guards_of_active_prerequisite_must_pass() {
        let gate = Conditional::new(vec![Prerequisite::when(|n: &i64| *n > 0)
            .require_pred(|n: &i64| n % 2 == 0, "even")
            .require_pred(|n: &i64| *n < 100, "small")]);
        assert!(gate.meets(&42));
        assert!(!gate.meets(&43));
        assert!(!gate.meets(&142));
    }

    #[test]
    fn active_prerequisites_reports_overlap() {
        let gate = Conditional::new(vec![
            Prerequisite::when(|n: &i64| *n > 0),
            Prerequisite::when(|n: &i64| *n > 10),
            Prerequisite::when(|n: &i64| *n < 0),
        ]);
        assert_eq!(gate.active_prerequisites(&20), vec![0, 1]);
        assert_eq!(gate.active_prerequisites(&5), vec![0]);
        assert!(gate.active_prerequisites(&0).is_empty());
    }

    #[test]
    fn audit_accumulates_all_violations() {
        let gate = Conditional::new(vec![Prerequisite::when(|n: &i64| *n > 0)
            .require_pred(|n: &i64| n % 2 == 0, "even")
            .require_pred(|n: &i64| *n < 100, "small")
            .require_pred(|_: &i64| true, "passes")]);

        match gate.audit(&143) {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 2);
                assert!(errors.iter().any(|e| e.label == "even" && e.guard == 0));
                assert!(errors.iter().any(|e| e.label == "small" && e.guard == 1));
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn audit_agrees_with_meets() {
        let gate = rejecting_x();
        for candidate in ["X", "Y", ""] {
            assert_eq!(gate.audit(candidate).is_success(), gate.meets(candidate));
        }
    }

    #[test]
    fn unlabeled_guard_gets_placeholder_label() {
        let gate = Conditional::new(vec![
            Prerequisite::when(|_: &i64| true).require(Guard::new(|_: &i64| false))
        ]);
        match gate.audit(&1) {
            Validation::Failure(errors) => {
                assert!(errors.iter().all(|e| e.label == "unlabeled guard"));
            }
            Validation::Success(_) => panic!("Expected failure"),
        }
    }
}

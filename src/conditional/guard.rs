//! Guard predicates used by prerequisites and transitions.
//!
//! Guards are pure boolean functions. They gate field writes (as the
//! candidacy test or a gauntlet entry of a prerequisite) and state machine
//! transitions (as simple matchers).

use std::fmt;
use std::sync::Arc;

/// Pure predicate over an input of type `T`, with an optional label used in
/// audit reports.
///
/// # Example
///
/// ```rust
/// use fielder::conditional::Guard;
///
/// let is_go = Guard::labeled("input is go", |input: &str| input == "go");
///
/// assert!(is_go.check("go"));
/// assert!(!is_go.check("stop"));
/// assert_eq!(is_go.label(), Some("input is go"));
/// ```
pub struct Guard<T: ?Sized> {
    predicate: Arc<dyn Fn(&T) -> bool + Send + Sync>,
    label: Option<String>,
}

impl<T: ?Sized> Guard<T> {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must be pure (deterministic, no side effects) and
    /// thread-safe (Send + Sync).
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
            label: None,
        }
    }

    /// Create a guard carrying a human-readable label.
    pub fn labeled<F>(label: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
            label: Some(label.into()),
        }
    }

    pub fn check(&self, input: &T) -> bool {
        (self.predicate)(input)
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

impl<T: ?Sized + 'static> Guard<T> {
    /// A guard that accepts every input.
    pub fn always() -> Self {
        Self::labeled("always", |_: &T| true)
    }

    /// A guard that rejects every input.
    pub fn never() -> Self {
        Self::labeled("never", |_: &T| false)
    }
}

impl<T: ?Sized> Clone for Guard<T> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
            label: self.label.clone(),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Guard<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").field("label", &self.label).finish()
    }
}

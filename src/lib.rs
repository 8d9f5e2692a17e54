//! Fielder: typed record fields and rule-gated state machines
//!
//! Fielder models the members of parent records as typed, comparable
//! [`Field`] cells and decides, through guard predicates, whether a value may
//! change and which state a value moves to next.
//!
//! # Core Concepts
//!
//! - **Field**: a typed value cell keyed to a record member, with native
//!   same-type comparison and a textual fallback across types
//! - **Defaults**: remembering a baseline and whether a value was set explicitly
//! - **Conditional**: ordered prerequisites whose guards approve or reject a change
//! - **Machine**: an immutable ring of states resolving the next value for an input
//!
//! # Example
//!
//! ```rust
//! use fielder::conditional::{Conditional, ConditionalField, Prerequisite};
//! use fielder::field::{Field, FieldKey, FieldType};
//!
//! let key = FieldKey::with_default_tag("quantity");
//! let floor = Field::integer(FieldKey::nil(), 0);
//! let gate = Conditional::new(vec![Prerequisite::when(|f: &Field| {
//!     f.field_type() == FieldType::Integer
//! })
//! .require_pred(move |f: &Field| f.greater_than(Some(&floor)), "positive")]);
//!
//! let mut quantity = ConditionalField::new(Field::integer(key.clone(), 1), gate);
//! assert!(quantity.set_value(&Field::integer(key.clone(), 5)));
//! assert!(!quantity.set_value(&Field::integer(key, -2)));
//! assert_eq!(quantity.field().to_string(), "5");
//! ```

pub mod builder;
pub mod conditional;
pub mod defaults;
pub mod field;
pub mod machine;

pub use builder::{BuildError, StateMachineBuilder};
pub use conditional::{Conditional, ConditionalField, Guard, Prerequisite};
pub use defaults::{Defaulted, Defaulter, FieldWithDefault};
pub use field::{Field, FieldError, FieldKey, FieldType, FieldValue};
pub use machine::{
    ConditionalStateMachine, Cursor, MachineError, StateId, StateMachine, StepResult,
};

//! Conditional gates for value changes.
//!
//! A [`Conditional`] is an ordered list of [`Prerequisite`]s, each pairing a
//! candidacy test with a gauntlet of [`Guard`]s. The gate approves a change
//! unless a prerequisite that applies to it has a failing guard.
//!
//! - [`Conditional::meets`] stops at the first failing guard.
//! - [`Conditional::audit`] collects every failing guard using Stillwater's
//!   `Validation`, for diagnostics.
//! - [`ConditionalField`] silently drops writes its gate rejects.

mod field;
mod gate;
mod guard;

pub use field::{ConditionalField, ConditionalFieldWithDefault};
pub use gate::{Conditional, GateViolation, Prerequisite};
pub use guard::Guard;

//! Cross-variant comparison fallback.
//!
//! Two fields of different variants are compared through their canonical
//! text. This keeps comparisons total across the closed variant set at the
//! cost of numeric and temporal meaning, which only holds within a variant.

use super::cell::Field;

/// Comparison requested of the safe comparator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SafeOp {
    Eq,
    Lt,
    Gt,
}

/// Compare two canonical strings lexicographically.
pub fn safe_compare(left: &str, right: &str, op: SafeOp) -> bool {
    match op {
        SafeOp::Eq => left == right,
        SafeOp::Lt => left < right,
        SafeOp::Gt => left > right,
    }
}

/// Resolve a comparison that does not need a same-variant comparison.
///
/// Returns `Some(false)` when `right` is absent, `Some(result)` of the
/// textual fallback when the variants differ, and `None` when both sides are
/// the same variant and the caller must compare native values.
pub fn check_and_do_safe_compare(left: &Field, right: Option<&Field>, op: SafeOp) -> Option<bool> {
    let Some(right) = right else {
        return Some(false);
    };
    if same_compare_types(left, right) {
        return None;
    }
    Some(safe_compare(&left.to_string(), &right.to_string(), op))
}

pub(crate) fn same_compare_types(left: &Field, right: &Field) -> bool {
    left.field_type() == right.field_type()
}

//! The typed value cell.

use super::compare::{check_and_do_safe_compare, same_compare_types, SafeOp};
use super::error::FieldError;
use super::key::FieldKey;
use super::value::{FieldType, FieldValue};
use bigdecimal::BigDecimal;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A typed, key-addressed value.
///
/// The variant of a field is fixed when it is constructed: assignments from
/// other variants are converted through the canonical text form instead of
/// replacing the variant.
///
/// # Example
///
/// ```rust
/// use fielder::field::{Field, FieldKey, FieldType};
///
/// let mut count = Field::integer(FieldKey::with_default_tag("Count"), 3);
/// let other = Field::integer(FieldKey::with_default_tag("Other"), 7);
/// assert!(count.less_than(Some(&other)));
/// assert!(!count.equal(None));
///
/// // Cross-variant assignment goes through text.
/// count.set_value(&Field::text(FieldKey::with_default_tag("Raw"), "42"));
/// assert_eq!(count.to_string(), "42");
/// assert_eq!(count.field_type(), FieldType::Integer);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Field {
    key: FieldKey,
    value: FieldValue,
    /// Explicit-assignment flag, only tracked for booleans.
    #[serde(default)]
    set: bool,
}

impl Field {
    fn with_value(key: FieldKey, value: FieldValue, set: bool) -> Self {
        Self { key, value, set }
    }

    pub fn text(key: FieldKey, value: impl Into<String>) -> Self {
        Self::with_value(key, FieldValue::Text(value.into()), false)
    }

    pub fn timestamp(key: FieldKey, value: DateTime<FixedOffset>) -> Self {
        Self::with_value(key, FieldValue::Timestamp(value), false)
    }

    pub fn decimal(key: FieldKey, value: BigDecimal) -> Self {
        Self::with_value(key, FieldValue::Decimal(value), false)
    }

    pub fn integer(key: FieldKey, value: i64) -> Self {
        Self::with_value(key, FieldValue::Integer(value), false)
    }

    /// A boolean that has been explicitly assigned `value`.
    pub fn boolean(key: FieldKey, value: bool) -> Self {
        Self::with_value(key, FieldValue::Boolean(value), true)
    }

    /// A boolean left at `false` without an explicit assignment.
    pub fn boolean_unset(key: FieldKey) -> Self {
        Self::with_value(key, FieldValue::Boolean(false), false)
    }

    pub fn empty(key: FieldKey) -> Self {
        Self::with_value(key, FieldValue::Empty, false)
    }

    /// The universal absent-value sentinel.
    pub fn nil() -> Self {
        Self::empty(FieldKey::nil())
    }

    /// The zero-valued cell of a variant.
    pub fn zero(ty: FieldType, key: FieldKey) -> Self {
        Self::with_value(key, FieldValue::zero(ty), false)
    }

    /// Construct a field of type `ty`.
    ///
    /// `None` yields the zero value of the variant. A value of a different
    /// variant is rejected rather than converted.
    pub fn from_type(
        ty: FieldType,
        value: Option<FieldValue>,
        key: FieldKey,
    ) -> Result<Self, FieldError> {
        let Some(value) = value else {
            return Ok(Self::zero(ty, key));
        };
        let found = value.field_type();
        if found != ty {
            return Err(FieldError::ValueMismatch { expected: ty, found });
        }
        let set = ty == FieldType::Boolean;
        Ok(Self::with_value(key, value, set))
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    pub fn key(&self) -> &FieldKey {
        &self.key
    }

    pub fn field_type(&self) -> FieldType {
        self.value.field_type()
    }

    /// Explicit-assignment flag of a boolean cell. Other variants report `false`.
    pub fn is_set(&self) -> bool {
        self.set
    }

    pub fn less_than(&self, other: Option<&Field>) -> bool {
        self.ordered(other, SafeOp::Lt, Ordering::Less)
    }

    pub fn greater_than(&self, other: Option<&Field>) -> bool {
        self.ordered(other, SafeOp::Gt, Ordering::Greater)
    }

    pub fn equal(&self, other: Option<&Field>) -> bool {
        if let FieldValue::Empty = self.value {
            // The sentinel only equals another sentinel with the same key.
            return match other {
                Some(other) if same_compare_types(self, other) => self.key == other.key,
                _ => false,
            };
        }
        if let Some(result) = check_and_do_safe_compare(self, other, SafeOp::Eq) {
            return result;
        }
        match other.map(|o| (&self.value, &o.value)) {
            Some((FieldValue::Boolean(a), FieldValue::Boolean(b))) => a == b,
            _ => self.native_cmp(other) == Some(Ordering::Equal),
        }
    }

    fn ordered(&self, other: Option<&Field>, op: SafeOp, want: Ordering) -> bool {
        // Ordering is undefined for booleans and the sentinel.
        if matches!(self.value, FieldValue::Boolean(_) | FieldValue::Empty) {
            return false;
        }
        if let Some(result) = check_and_do_safe_compare(self, other, op) {
            return result;
        }
        self.native_cmp(other) == Some(want)
    }

    fn native_cmp(&self, other: Option<&Field>) -> Option<Ordering> {
        match (&self.value, &other?.value) {
            (FieldValue::Text(a), FieldValue::Text(b)) => Some(a.cmp(b)),
            (FieldValue::Timestamp(a), FieldValue::Timestamp(b)) => Some(a.cmp(b)),
            (FieldValue::Decimal(a), FieldValue::Decimal(b)) => Some(a.cmp(b)),
            (FieldValue::Integer(a), FieldValue::Integer(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Parse `input` into this field, leaving it untouched on failure.
    pub fn try_from_string(&mut self, input: &str) -> Result<(), FieldError> {
        let ty = self.field_type();
        if ty == FieldType::Empty {
            return Ok(());
        }
        self.value = FieldValue::parse(ty, input)?;
        if ty == FieldType::Boolean {
            self.set = true;
        }
        Ok(())
    }

    /// Best-effort parse: unparsable input resets the field to its zero value.
    pub fn from_string(&mut self, input: &str) {
        if let Err(err) = self.try_from_string(input) {
            tracing::debug!(key = %self.key, error = %err, "resetting field to zero value");
            self.value = FieldValue::zero(self.field_type());
            self.set = false;
        }
    }

    /// Assign from another field.
    ///
    /// A field of the same variant is copied natively; any other variant is
    /// converted through its canonical text. The sentinel ignores assignment.
    pub fn set_value(&mut self, other: &Field) {
        match self.value {
            FieldValue::Empty => {}
            _ if same_compare_types(self, other) => {
                self.value = other.value.clone();
                if let FieldValue::Boolean(_) = self.value {
                    self.set = true;
                }
            }
            _ => self.from_string(&other.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self.value {
            FieldValue::Boolean(_) => !self.set,
            _ => self.value.is_zero(),
        }
    }

    /// Explicitly assign `true` to a boolean cell.
    pub fn init_true(&mut self) {
        if let FieldValue::Boolean(_) = self.value {
            self.value = FieldValue::Boolean(true);
            self.set = true;
        }
    }

    /// Explicitly assign `false` to a boolean cell.
    pub fn init_false(&mut self) {
        if let FieldValue::Boolean(_) = self.value {
            self.value = FieldValue::Boolean(false);
            self.set = true;
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}

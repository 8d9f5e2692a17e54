//! Fields whose writes are gated by a [`Conditional`].

use super::gate::{Conditional, Prerequisite};
use crate::defaults::{Defaulted, Defaulter};
use crate::field::Field;

/// A field that only accepts writes its gate approves.
///
/// Rejected writes are dropped without error; inspect the field (or the
/// returned flag) to detect them.
///
/// # Example
///
/// ```rust
/// use fielder::conditional::{Conditional, ConditionalField, Guard, Prerequisite};
/// use fielder::field::{Field, FieldKey};
///
/// let key = FieldKey::with_default_tag("HasColor");
/// let green_is_set = false;
///
/// // Setting HasColor to true requires Green to be true.
/// let gate = Conditional::new(vec![
///     Prerequisite::when(|f: &Field| f.to_string() == "true")
///         .require(Guard::new(move |_: &Field| green_is_set)),
/// ]);
/// let mut has_color = ConditionalField::new(Field::boolean(key.clone(), false), gate);
///
/// assert!(!has_color.set_value(&Field::boolean(key.clone(), true)));
/// assert_eq!(has_color.field().to_string(), "false");
/// ```
pub struct ConditionalField {
    field: Field,
    conditional: Conditional<Field>,
}

impl ConditionalField {
    pub fn new(field: Field, conditional: Conditional<Field>) -> Self {
        Self { field, conditional }
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn conditional(&self) -> &Conditional<Field> {
        &self.conditional
    }

    pub fn meets(&self, intended: &Field) -> bool {
        self.conditional.meets(intended)
    }

    /// Apply `intended` if the gate approves it. Returns whether it applied.
    pub fn set_value(&mut self, intended: &Field) -> bool {
        if !self.conditional.meets(intended) {
            tracing::debug!(key = %self.field.key(), "conditional write rejected");
            return false;
        }
        self.field.set_value(intended);
        true
    }

    pub fn into_field(self) -> Field {
        self.field
    }
}

/// A gated field that also tracks its baseline.
pub struct ConditionalFieldWithDefault {
    field: Field,
    conditional: Conditional<Field>,
    default: Defaulter,
}

impl ConditionalFieldWithDefault {
    /// Wrap a field that already holds an explicitly assigned value.
    pub fn new(field: Field, prereqs: Vec<Prerequisite<Field>>, baseline: Field) -> Self {
        Self {
            field,
            conditional: Conditional::new(prereqs),
            default: Defaulter::new(true, baseline),
        }
    }

    /// Start from a copy of the baseline, not explicitly set.
    pub fn new_empty(prereqs: Vec<Prerequisite<Field>>, baseline: Field) -> Self {
        Self {
            field: baseline.clone(),
            conditional: Conditional::new(prereqs),
            default: Defaulter::new(false, baseline),
        }
    }

    pub fn conditional(&self) -> &Conditional<Field> {
        &self.conditional
    }

    /// Apply `intended` if the gate approves it, marking the field as
    /// explicitly set. Returns whether it applied.
    pub fn set_value(&mut self, intended: &Field) -> bool {
        if !self.conditional.meets(intended) {
            tracing::debug!(key = %self.field.key(), "conditional write rejected");
            return false;
        }
        self.field.set_value(intended);
        self.default.mark_explicit(true);
        true
    }
}

impl Defaulted for ConditionalFieldWithDefault {
    fn field(&self) -> &Field {
        &self.field
    }

    fn defaulter(&self) -> &Defaulter {
        &self.default
    }
}

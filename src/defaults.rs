//! Tracking whether a field still holds its baseline value.

use crate::field::Field;

/// Baseline value plus the explicit-assignment flag for one field.
///
/// The flag is never toggled by the defaulter itself; whoever performs an
/// explicit write flips it with [`Defaulter::mark_explicit`].
#[derive(Clone, Debug)]
pub struct Defaulter {
    explicitly_set: bool,
    baseline: Field,
}

impl Defaulter {
    pub fn new(explicitly_set: bool, baseline: Field) -> Self {
        Self {
            explicitly_set,
            baseline,
        }
    }

    pub fn explicitly_set(&self) -> bool {
        self.explicitly_set
    }

    pub fn mark_explicit(&mut self, explicitly_set: bool) {
        self.explicitly_set = explicitly_set;
    }

    pub fn matches_default(&self, field: &Field) -> bool {
        self.baseline.equal(Some(field))
    }

    pub fn default_field(&self) -> &Field {
        &self.baseline
    }
}

/// Anything that pairs a live field with a [`Defaulter`].
pub trait Defaulted {
    fn field(&self) -> &Field;

    fn defaulter(&self) -> &Defaulter;

    /// True iff the field equals its baseline and was never explicitly set.
    fn is_default(&self) -> bool {
        let defaulter = self.defaulter();
        defaulter.matches_default(self.field()) && !defaulter.explicitly_set()
    }
}

/// A field guarded by a baseline.
///
/// # Example
///
/// ```rust
/// use fielder::defaults::{Defaulted, Defaulter, FieldWithDefault};
/// use fielder::field::{Field, FieldKey};
///
/// let key = FieldKey::with_default_tag("Retries");
/// let baseline = Field::integer(key.clone(), 3);
/// let mut retries = FieldWithDefault::new(Field::integer(key, 3), Defaulter::new(false, baseline));
/// assert!(retries.is_default());
///
/// retries.defaulter_mut().mark_explicit(true);
/// assert!(!retries.is_default());
/// ```
#[derive(Clone, Debug)]
pub struct FieldWithDefault {
    field: Field,
    default: Defaulter,
}

impl FieldWithDefault {
    pub fn new(field: Field, default: Defaulter) -> Self {
        Self { field, default }
    }

    pub fn field_mut(&mut self) -> &mut Field {
        &mut self.field
    }

    pub fn defaulter_mut(&mut self) -> &mut Defaulter {
        &mut self.default
    }

    pub fn into_field(self) -> Field {
        self.field
    }
}

impl Defaulted for FieldWithDefault {
    fn field(&self) -> &Field {
        &self.field
    }

    fn defaulter(&self) -> &Defaulter {
        &self.default
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldKey;

    fn key() -> FieldKey {
        FieldKey::with_default_tag("Status")
    }

    #[test]
    fn matching_unset_field_is_default() {
        let wrapped = FieldWithDefault::new(
            Field::text(key(), "draft"),
            Defaulter::new(false, Field::text(key(), "draft")),
        );
        assert!(wrapped.is_default());
    }

    #[test]
    fn explicit_flag_overrides_matching_value() {
        let wrapped = FieldWithDefault::new(
            Field::text(key(), "draft"),
            Defaulter::new(true, Field::text(key(), "draft")),
        );
        assert!(!wrapped.is_default());
    }

    #[test]
    fn changed_value_is_not_default() {
        let mut wrapped = FieldWithDefault::new(
            Field::text(key(), "draft"),
            Defaulter::new(false, Field::text(key(), "draft")),
        );
        wrapped
            .field_mut()
            .set_value(&Field::text(key(), "published"));
        assert!(!wrapped.is_default());
        assert!(!wrapped.defaulter().explicitly_set());
    }

    #[test]
    fn matches_default_uses_field_equality() {
        let defaulter = Defaulter::new(false, Field::integer(key(), 10));
        assert!(defaulter.matches_default(&Field::text(key(), "10")));
        assert!(!defaulter.matches_default(&Field::integer(key(), 11)));
        assert_eq!(defaulter.default_field().to_string(), "10");
    }
}

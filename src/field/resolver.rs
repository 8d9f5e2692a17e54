//! Key resolution against parent records.
//!
//! Parents register their members explicitly: each entry pairs a key and
//! declared type with an accessor returning the member's live value.

use super::cell::Field;
use super::key::{is_field_key, FieldKey, FieldName, FIELD_KEY_TAG};
use super::value::{FieldType, FieldValue};

/// Answers questions about the members of a parent record of type `P`.
pub trait KeyResolver<P> {
    /// Whether `key` names a member of the parent.
    fn check_key_exists(&self, key: &FieldKey) -> bool;

    /// Declared type of the member named by `key`.
    fn field_type(&self, key: &FieldKey) -> Option<FieldType>;

    /// Live value of the member named by `key`.
    fn value_of(&self, parent: &P, key: &FieldKey) -> Option<FieldValue>;

    /// A field wrapping the member's live value, or [`Field::nil`] when the
    /// key is unknown or the member holds its zero value.
    fn field_from_key(&self, parent: &P, key: &FieldKey) -> Field;
}

type Accessor<P> = Box<dyn Fn(&P) -> FieldValue + Send + Sync>;

struct Member<P> {
    key: FieldKey,
    ty: FieldType,
    accessor: Accessor<P>,
}

/// Explicit member registry for one parent record type.
///
/// # Example
///
/// ```rust
/// use fielder::field::{FieldKey, FieldType, KeyResolver, RecordSchema};
///
/// struct Leaf {
///     green: bool,
///     label: String,
/// }
///
/// let schema = RecordSchema::new("")
///     .member("Green", FieldType::Boolean, |l: &Leaf| l.green.into())
///     .member("Label", FieldType::Text, |l: &Leaf| l.label.clone().into());
///
/// let leaf = Leaf { green: true, label: "oak".to_string() };
/// let label = schema.field_from_key(&leaf, &FieldKey::with_default_tag("Label"));
/// assert_eq!(label.to_string(), "oak");
/// assert!(schema.field_from_key(&leaf, &FieldKey::with_default_tag("Bark")).key().is_nil());
/// ```
pub struct RecordSchema<P> {
    tag: String,
    members: Vec<Member<P>>,
}

impl<P> RecordSchema<P> {
    /// Create an empty schema; an empty tag falls back to [`FIELD_KEY_TAG`].
    pub fn new(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        Self {
            tag: if tag.is_empty() {
                FIELD_KEY_TAG.to_string()
            } else {
                tag
            },
            members: Vec::new(),
        }
    }

    /// Register a member under this schema's tag.
    pub fn member<F>(mut self, name: impl Into<String>, ty: FieldType, accessor: F) -> Self
    where
        F: Fn(&P) -> FieldValue + Send + Sync + 'static,
    {
        self.members.push(Member {
            key: FieldKey::new(name, self.tag.clone()),
            ty,
            accessor: Box::new(accessor),
        });
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Every registered key, in registration order.
    pub fn key_set(&self) -> Vec<FieldKey> {
        self.members.iter().map(|m| m.key.clone()).collect()
    }

    fn lookup(&self, key: &FieldKey) -> Option<&Member<P>> {
        self.members.iter().find(|m| &m.key == key)
    }
}

impl<P> KeyResolver<P> for RecordSchema<P> {
    fn check_key_exists(&self, key: &FieldKey) -> bool {
        key.tag() == self.tag && is_field_key(key.name(), &self.key_set())
    }

    fn field_type(&self, key: &FieldKey) -> Option<FieldType> {
        self.lookup(key).map(|m| m.ty)
    }

    fn value_of(&self, parent: &P, key: &FieldKey) -> Option<FieldValue> {
        self.lookup(key).map(|m| (m.accessor)(parent))
    }

    fn field_from_key(&self, parent: &P, key: &FieldKey) -> Field {
        let Some(member) = self.lookup(key) else {
            return Field::nil();
        };
        let value = (member.accessor)(parent);
        if value.is_zero() {
            return Field::nil();
        }
        match Field::from_type(member.ty, Some(value), key.clone()) {
            Ok(field) => field,
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "member value does not match its declared type");
                Field::nil()
            }
        }
    }
}

impl<P> RecordSchema<P> {
    /// Convenience lookup by bare member name under this schema's tag.
    pub fn field_named(&self, parent: &P, name: &FieldName) -> Field {
        self.field_from_key(parent, &FieldKey::new(name.as_str(), self.tag.clone()))
    }
}

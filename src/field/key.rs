//! Field keys correlating a cell with a member of a parent record.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag namespace used when a key is created without an explicit tag.
pub const FIELD_KEY_TAG: &str = "field";

/// Name of a member on a parent record.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldName(String);

impl FieldName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Stable identifier for a field: a member name plus its tag namespace.
///
/// Equality is structural, so two keys with the same name under different
/// tags are distinct.
///
/// # Example
///
/// ```rust
/// use fielder::field::{FieldKey, FIELD_KEY_TAG};
///
/// let key = FieldKey::new("HasColor", "");
/// assert_eq!(key.tag(), FIELD_KEY_TAG);
/// assert_eq!(key, FieldKey::with_default_tag("HasColor"));
/// assert_ne!(key, FieldKey::new("HasColor", "db"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldKey {
    name: FieldName,
    tag: String,
}

impl FieldKey {
    /// Create a key; an empty tag falls back to [`FIELD_KEY_TAG`].
    pub fn new(name: impl Into<String>, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        Self {
            name: FieldName::new(name),
            tag: if tag.is_empty() {
                FIELD_KEY_TAG.to_string()
            } else {
                tag
            },
        }
    }

    pub fn with_default_tag(name: impl Into<String>) -> Self {
        Self {
            name: FieldName::new(name),
            tag: FIELD_KEY_TAG.to_string(),
        }
    }

    /// The reserved "no key" sentinel.
    pub fn nil() -> Self {
        Self::with_default_tag("nil")
    }

    pub fn is_nil(&self) -> bool {
        *self == Self::nil()
    }

    pub fn name(&self) -> &FieldName {
        &self.name
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.tag, self.name)
    }
}

/// Check whether `name` is one of the keys in `key_set`.
///
/// All keys of one parent are expected to share a tag, so the lookup key is
/// built with the tag of the first entry.
pub fn is_field_key(name: &FieldName, key_set: &[FieldKey]) -> bool {
    let Some(first) = key_set.first() else {
        return false;
    };
    if name.is_empty() {
        return false;
    }
    let probe = FieldKey::new(name.as_str(), first.tag());
    key_set.contains(&probe)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tag_uses_default() {
        let key = FieldKey::new("Grass", "");
        assert_eq!(key.tag(), FIELD_KEY_TAG);
        assert_eq!(key.name().as_str(), "Grass");
    }

    #[test]
    fn nil_sentinel_is_recognised() {
        assert!(FieldKey::nil().is_nil());
        assert!(!FieldKey::with_default_tag("Green").is_nil());
        assert!(!FieldKey::new("nil", "db").is_nil());
    }

    #[test]
    fn is_field_key_uses_first_tag() {
        let keys = vec![FieldKey::new("Grass", "db"), FieldKey::new("Green", "db")];

        assert!(is_field_key(&FieldName::from("Green"), &keys));
        assert!(!is_field_key(&FieldName::from("HasColor"), &keys));
        assert!(!is_field_key(&FieldName::from(""), &keys));
        assert!(!is_field_key(&FieldName::from("Green"), &[]));
    }

    #[test]
    fn key_serializes_correctly() {
        let key = FieldKey::new("Grass", "db");
        let json = serde_json::to_string(&key).unwrap();
        let deserialized: FieldKey = serde_json::from_str(&json).unwrap();
        assert_eq!(key, deserialized);
    }
}

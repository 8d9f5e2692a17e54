//! Field errors.

use super::value::FieldType;
use thiserror::Error;

/// Errors raised at the field construction and parsing boundary.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FieldError {
    #[error("Unsupported field type '{0}'")]
    UnsupportedType(String),

    #[error("Value of type {found} cannot initialise a {expected} field")]
    ValueMismatch { expected: FieldType, found: FieldType },

    #[error("Cannot parse '{input}' as {ty}: {reason}")]
    Parse {
        ty: FieldType,
        input: String,
        reason: String,
    },
}

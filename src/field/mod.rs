//! Typed value cells for members of parent records.
//!
//! A [`Field`] holds one value from a closed set of variants (text,
//! timestamp, decimal, integer, boolean, empty) together with the
//! [`FieldKey`] that ties it to a member of a parent record.
//!
//! - Same-variant comparisons use the native ordering of the value.
//! - Mixed-variant comparisons fall back to comparing canonical text.
//! - Every variant round-trips through its canonical text form.

mod cell;
mod compare;
mod error;
mod key;
mod resolver;
mod value;

pub use cell::Field;
pub use compare::{check_and_do_safe_compare, safe_compare, SafeOp};
pub use error::FieldError;
pub use key::{is_field_key, FieldKey, FieldName, FIELD_KEY_TAG};
pub use resolver::{KeyResolver, RecordSchema};
pub use value::{FieldType, FieldValue};

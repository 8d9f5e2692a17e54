//! Native values and type descriptors for the closed set of field variants.

use super::error::FieldError;
use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stable type descriptor, one per field variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    Text,
    Timestamp,
    Decimal,
    Integer,
    Boolean,
    Empty,
}

impl FieldType {
    pub const ALL: [FieldType; 6] = [
        FieldType::Text,
        FieldType::Timestamp,
        FieldType::Decimal,
        FieldType::Integer,
        FieldType::Boolean,
        FieldType::Empty,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Timestamp => "timestamp",
            Self::Decimal => "decimal",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Empty => "empty",
        }
    }

    /// Resolve a descriptor from its name.
    ///
    /// Accepts the canonical names returned by [`FieldType::name`] and the
    /// common short aliases (`string`, `time`, `int`, `bool`).
    pub fn from_name(name: &str) -> Result<Self, FieldError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "text" | "string" => Ok(Self::Text),
            "timestamp" | "time" => Ok(Self::Timestamp),
            "decimal" => Ok(Self::Decimal),
            "integer" | "int" => Ok(Self::Integer),
            "boolean" | "bool" => Ok(Self::Boolean),
            "empty" => Ok(Self::Empty),
            _ => Err(FieldError::UnsupportedType(name.to_string())),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FieldType {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

/// The native value held by a field.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Text(String),
    Timestamp(DateTime<FixedOffset>),
    Decimal(BigDecimal),
    Integer(i64),
    Boolean(bool),
    Empty,
}

impl FieldValue {
    /// The zero value of a variant. The zero timestamp is the Unix epoch.
    pub fn zero(ty: FieldType) -> Self {
        match ty {
            FieldType::Text => Self::Text(String::new()),
            FieldType::Timestamp => Self::Timestamp(DateTime::<FixedOffset>::default()),
            FieldType::Decimal => Self::Decimal(BigDecimal::zero()),
            FieldType::Integer => Self::Integer(0),
            FieldType::Boolean => Self::Boolean(false),
            FieldType::Empty => Self::Empty,
        }
    }

    pub fn field_type(&self) -> FieldType {
        match self {
            Self::Text(_) => FieldType::Text,
            Self::Timestamp(_) => FieldType::Timestamp,
            Self::Decimal(_) => FieldType::Decimal,
            Self::Integer(_) => FieldType::Integer,
            Self::Boolean(_) => FieldType::Boolean,
            Self::Empty => FieldType::Empty,
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::Timestamp(t) => *t == DateTime::<FixedOffset>::default(),
            Self::Decimal(d) => d.is_zero(),
            Self::Integer(i) => *i == 0,
            Self::Boolean(b) => !*b,
            Self::Empty => true,
        }
    }

    /// Parse the canonical textual form of a variant.
    pub fn parse(ty: FieldType, input: &str) -> Result<Self, FieldError> {
        let parse_err = |reason: String| FieldError::Parse {
            ty,
            input: input.to_string(),
            reason,
        };
        match ty {
            FieldType::Text => Ok(Self::Text(input.to_string())),
            FieldType::Timestamp => DateTime::parse_from_rfc3339(input)
                .map(Self::Timestamp)
                .map_err(|e| parse_err(e.to_string())),
            FieldType::Decimal => BigDecimal::from_str(input)
                .map(Self::Decimal)
                .map_err(|e| parse_err(e.to_string())),
            FieldType::Integer => input
                .parse::<i64>()
                .map(Self::Integer)
                .map_err(|e| parse_err(e.to_string())),
            FieldType::Boolean => parse_bool(input)
                .map(Self::Boolean)
                .ok_or_else(|| parse_err("expected a boolean token".to_string())),
            FieldType::Empty => Ok(Self::Empty),
        }
    }
}

fn parse_bool(input: &str) -> Option<bool> {
    match input {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

/// Canonical textual form: RFC 3339 for timestamps (`Z` for UTC, sub-second
/// digits only when present), exact base-10 for numbers, `true`/`false`,
/// and the empty string for the empty variant.
impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Timestamp(t) => f.write_str(&t.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Self::Decimal(d) => write!(f, "{d}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Empty => Ok(()),
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<DateTime<FixedOffset>> for FieldValue {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Self::Timestamp(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value.fixed_offset())
    }
}

impl From<BigDecimal> for FieldValue {
    fn from(value: BigDecimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

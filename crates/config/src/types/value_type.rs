//! Declared value types for schema entries.
//!
//! Responsibilities:
//! - Enumerate the five recognized type names and their canonical spelling.
//! - Parse type names from schema declarations.
//!
//! Does NOT handle:
//! - Coercing raw strings into values (see `loader::engine`).
//!
//! Invariants:
//! - Type names are matched exactly and are lower-case.

use std::fmt;
use std::str::FromStr;

/// Type a configuration value is coerced to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// Raw string, passed through unchanged.
    String,
    /// Integer-shaped string, coerced to an `i64`.
    Number,
    /// `true` or `false`, case-insensitive.
    Boolean,
    /// Any JSON document.
    Json,
    /// Comma-separated list of trimmed strings.
    Array,
}

impl ValueType {
    pub const ALL: [ValueType; 5] = [
        ValueType::String,
        ValueType::Number,
        ValueType::Boolean,
        ValueType::Json,
        ValueType::Array,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Number => "number",
            ValueType::Boolean => "boolean",
            ValueType::Json => "json",
            ValueType::Array => "array",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a type name is not one of the recognized types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownValueType(pub String);

impl fmt::Display for UnknownValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown type '{}'", self.0)
    }
}

impl std::error::Error for UnknownValueType {}

impl FromStr for ValueType {
    type Err = UnknownValueType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ValueType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownValueType(s.to_string()))
    }
}

//! Attribute records for schema entries.
//!
//! Responsibilities:
//! - Define `Attributes` (type, required-ness, default, validator, allowed values).
//! - Define the `DefaultValue` and `Validator` variants a schema entry may carry.
//! - Deserialize attribute records from JSON schema documents.
//!
//! Does NOT handle:
//! - Applying any of these rules to raw values (see `loader::engine`).
//!
//! Invariants:
//! - `kind` is kept as a type name, not a parsed `ValueType`, so that an
//!   unrecognized name surfaces as `InvalidType` only when a value is coerced.
//! - `allowed` is kept as a raw JSON value so a non-sequence declaration can be
//!   reported as `InvalidSchema` for its key.

use std::fmt;
use std::sync::Arc;

use regex::Regex;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::ResolvedConfig;
use super::value_type::ValueType;

/// Predicate run after every key is resolved: `(value, key, full config) -> accepted`.
pub type Predicate = Arc<dyn Fn(Option<&Value>, &str, &ResolvedConfig) -> bool + Send + Sync>;

/// Zero-argument producer of a default value.
pub type DefaultFactory = Arc<dyn Fn() -> Value + Send + Sync>;

/// Default used when the raw value is absent or empty.
#[derive(Clone)]
pub enum DefaultValue {
    Literal(Value),
    Factory(DefaultFactory),
}

impl DefaultValue {
    /// Produce the default value, invoking the factory if there is one.
    pub fn produce(&self) -> Value {
        match self {
            DefaultValue::Literal(value) => value.clone(),
            DefaultValue::Factory(factory) => factory(),
        }
    }
}

impl fmt::Debug for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            DefaultValue::Factory(_) => f.write_str("Factory(..)"),
        }
    }
}

/// Deferred check attached to a schema entry.
#[derive(Clone)]
pub enum Validator {
    /// Callback that must return `true` for the value to be accepted.
    Predicate(Predicate),
    /// Regular expression matched against the value's string form.
    Pattern(Regex),
    /// A pattern that failed to compile.
    InvalidPattern { pattern: String, message: String },
    /// Anything else a schema document put under `validate`.
    Unsupported(Value),
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Validator::Predicate(_) => f.write_str("Predicate(..)"),
            Validator::Pattern(re) => f.debug_tuple("Pattern").field(&re.as_str()).finish(),
            Validator::InvalidPattern { pattern, message } => f
                .debug_struct("InvalidPattern")
                .field("pattern", pattern)
                .field("message", message)
                .finish(),
            Validator::Unsupported(value) => f.debug_tuple("Unsupported").field(value).finish(),
        }
    }
}

impl From<Value> for Validator {
    /// Strings are compiled as regular expressions; other JSON values are unsupported.
    fn from(value: Value) -> Self {
        match value {
            Value::String(pattern) => match Regex::new(&pattern) {
                Ok(re) => Validator::Pattern(re),
                Err(e) => Validator::InvalidPattern {
                    pattern,
                    message: e.to_string(),
                },
            },
            other => Validator::Unsupported(other),
        }
    }
}

/// Full attribute record for one configuration key.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "RawAttributes")]
pub struct Attributes {
    /// Declared type name.
    pub kind: String,
    /// Whether a non-empty raw value must be supplied.
    pub required: bool,
    /// Value used when the raw value is absent or empty.
    pub default: Option<DefaultValue>,
    /// Deferred check run once every key has been resolved.
    pub validate: Option<Validator>,
    /// Allowed values (`enum` in schema documents).
    pub allowed: Option<Value>,
}

impl Attributes {
    pub fn new(kind: ValueType) -> Self {
        Self::named(kind.as_str())
    }

    /// Create attributes from a type name that has not been checked yet.
    pub fn named(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            required: false,
            default: None,
            validate: None,
            allowed: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(DefaultValue::Literal(value.into()));
        self
    }

    pub fn with_default_fn<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.default = Some(DefaultValue::Factory(Arc::new(factory)));
        self
    }

    pub fn with_validator<F>(mut self, predicate: F) -> Self
    where
        F: Fn(Option<&Value>, &str, &ResolvedConfig) -> bool + Send + Sync + 'static,
    {
        self.validate = Some(Validator::Predicate(Arc::new(predicate)));
        self
    }

    pub fn with_pattern(mut self, pattern: Regex) -> Self {
        self.validate = Some(Validator::Pattern(pattern));
        self
    }

    /// Restrict the resolved value to the given sequence of allowed values.
    pub fn with_enum<I, V>(mut self, allowed: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.allowed = Some(Value::Array(allowed.into_iter().map(Into::into).collect()));
        self
    }

    /// Set the allowed values from an arbitrary JSON value, unchecked.
    pub fn with_enum_value(mut self, allowed: Value) -> Self {
        self.allowed = Some(allowed);
        self
    }
}

impl From<ValueType> for Attributes {
    fn from(kind: ValueType) -> Self {
        Attributes::new(kind)
    }
}

/// Wire form of an attribute record in a JSON schema document.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawAttributes {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    required: bool,
    #[serde(default, deserialize_with = "present")]
    default: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    validate: Option<Value>,
    #[serde(rename = "enum", default, deserialize_with = "present")]
    allowed: Option<Value>,
}

/// Treat an explicit `null` as present, unlike the stock `Option` handling.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl From<RawAttributes> for Attributes {
    fn from(raw: RawAttributes) -> Self {
        Self {
            kind: raw.kind,
            required: raw.required,
            default: raw.default.map(DefaultValue::Literal),
            validate: raw.validate.map(Validator::from),
            allowed: raw.allowed,
        }
    }
}

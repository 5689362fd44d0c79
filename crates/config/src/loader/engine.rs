//! Schema coercion engine.
//!
//! Responsibilities:
//! - Resolve one raw string per key into a typed value (`parse`).
//! - Apply required-ness, defaults, type coercion, and `enum` membership per key.
//! - Queue `validate` checks and run them once every key is resolved (`resolve`).
//!
//! Does NOT handle:
//! - Reading or merging raw sources (see sources.rs).
//! - Guarding access to the result (see `crate::view`).
//!
//! Invariants:
//! - Every schema key is present in the resolved config, possibly as `None`.
//! - No key outside the schema is ever inserted.
//! - Deferred validators run in schema declaration order against the complete config.
//! - The first failure aborts the load; no partial config escapes.
//! - Required values are passed through as raw strings regardless of declared type.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Number, Value};

use super::error::ConfigError;
use super::sources::RawValues;
use crate::constants::ARRAY_SEPARATOR;
use crate::types::{Attributes, DefaultValue, ResolvedConfig, Schema, Validator, ValueType};

/// Optional leading `-`, then `0` or a digit string without leading zeros.
static INTEGER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?(0|[1-9][0-9]*)$").expect("integer pattern is valid"));

/// Resolve the raw value for a single key into its typed value.
///
/// Returns `Ok(None)` for an optional key with no raw value and no default.
pub fn parse(
    key: &str,
    attrs: &Attributes,
    raw: Option<&str>,
) -> Result<Option<Value>, ConfigError> {
    if attrs.required {
        return match raw {
            Some(value) if !value.is_empty() => Ok(Some(Value::String(value.to_string()))),
            _ => Err(ConfigError::invalid_value(
                key,
                raw.unwrap_or_default(),
                "a non-empty value is required",
            )),
        };
    }

    match raw {
        None | Some("") => Ok(default_for(attrs)),
        Some(value) => coerce(key, &attrs.kind, value).map(Some),
    }
}

/// Value used when an optional key has no raw value.
fn default_for(attrs: &Attributes) -> Option<Value> {
    match &attrs.default {
        Some(factory @ DefaultValue::Factory(_)) => Some(factory.produce()),
        _ if attrs.kind == ValueType::Array.as_str() => Some(Value::Array(Vec::new())),
        literal => literal.as_ref().map(DefaultValue::produce),
    }
}

/// Coerce a present, non-empty raw string to the declared type.
pub fn coerce(key: &str, kind: &str, raw: &str) -> Result<Value, ConfigError> {
    let kind: ValueType = kind.parse().map_err(|_| ConfigError::InvalidType {
        key: key.to_string(),
        kind: kind.to_string(),
    })?;

    match kind {
        ValueType::String => Ok(Value::String(raw.to_string())),
        ValueType::Array => Ok(Value::Array(
            raw.split(ARRAY_SEPARATOR)
                .map(|item| Value::String(item.trim().to_string()))
                .collect(),
        )),
        ValueType::Number => {
            if !INTEGER_PATTERN.is_match(raw) {
                return Err(ConfigError::invalid_value(
                    key,
                    raw,
                    "must be an integer without leading zeros",
                ));
            }
            let number: i64 = raw
                .parse()
                .map_err(|_| ConfigError::invalid_value(key, raw, "integer is out of range"))?;
            Ok(Value::from(number))
        }
        ValueType::Boolean => match raw.to_lowercase().as_str() {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            _ => Err(ConfigError::invalid_value(key, raw, "must be true or false")),
        },
        ValueType::Json => serde_json::from_str(raw)
            .map_err(|e| ConfigError::invalid_value(key, raw, format!("invalid JSON: {e}"))),
    }
}

/// Default string form of a resolved value, used for pattern matching.
///
/// Strings are used verbatim, arrays join their items with `,`, objects are
/// rendered as compact JSON, and an undefined value is the empty string.
/// Integral floats print without a fractional part (`2.0` is `2`).
pub fn value_to_string(value: Option<&Value>) -> String {
    match value {
        None => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => number_to_string(n),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => value_to_string(Some(other)),
            })
            .collect::<Vec<_>>()
            .join(","),
        Some(other) => other.to_string(),
    }
}

fn number_to_string(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f == 0.0 => "0".to_string(),
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => format!("{f:.0}"),
        _ => n.to_string(),
    }
}

/// Equality used for `enum` membership. Numbers compare by value, so `2` and
/// `2.0` are the same member.
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => x == y,
            _ => match (x.as_u64(), y.as_u64()) {
                (Some(x), Some(y)) => x == y,
                _ => x.as_f64().is_some_and(|x| Some(x) == y.as_f64()),
            },
        },
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(k, x)| ys.get(k).is_some_and(|y| values_equal(x, y)))
        }
        _ => a == b,
    }
}

/// Check the resolved value against the entry's allowed values, if any.
fn check_enum(key: &str, attrs: &Attributes, value: Option<&Value>) -> Result<(), ConfigError> {
    let Some(allowed) = &attrs.allowed else {
        return Ok(());
    };
    let Value::Array(members) = allowed else {
        return Err(ConfigError::invalid_schema(key, "enum must be a sequence"));
    };

    if value.is_some_and(|v| members.iter().any(|m| values_equal(m, v))) {
        Ok(())
    } else {
        Err(ConfigError::EnumViolation {
            key: key.to_string(),
            value: value.map_or_else(|| "<unset>".to_string(), Value::to_string),
            allowed: allowed.to_string(),
        })
    }
}

/// Accept a validator for deferred execution, or reject it as malformed.
fn defer_validator(key: &str, validator: &Validator) -> Result<Validator, ConfigError> {
    match validator {
        Validator::Predicate(_) | Validator::Pattern(_) => Ok(validator.clone()),
        Validator::InvalidPattern { pattern, message } => Err(ConfigError::invalid_schema(
            key,
            format!("validate pattern '{pattern}' does not compile: {message}"),
        )),
        Validator::Unsupported(value) => Err(ConfigError::invalid_schema(
            key,
            format!("validate must be a function or a regular expression, got {value}"),
        )),
    }
}

fn run_validator(
    key: &str,
    validator: &Validator,
    config: &ResolvedConfig,
) -> Result<(), ConfigError> {
    let value = config.get(key).and_then(Option::as_ref);
    let accepted = match validator {
        Validator::Predicate(predicate) => predicate(value, key, config),
        Validator::Pattern(re) => re.is_match(&value_to_string(value)),
        Validator::InvalidPattern { .. } | Validator::Unsupported(_) => false,
    };

    if accepted {
        Ok(())
    } else {
        Err(ConfigError::ValidationFailed {
            key: key.to_string(),
        })
    }
}

/// Resolve every schema key against the merged raw values.
///
/// Pass one coerces each key in declaration order and queues its validator.
/// Pass two drains the queue against the fully populated config.
pub fn resolve(schema: &Schema, raw: &RawValues) -> Result<ResolvedConfig, ConfigError> {
    let mut config = ResolvedConfig::with_capacity(schema.len());
    let mut pending: Vec<(&str, Validator)> = Vec::new();

    for (key, entry) in schema.iter() {
        let attrs = entry.normalize();
        let raw_value = raw.get(key).map(String::as_str);
        let value = parse(key, &attrs, raw_value)?;
        tracing::trace!(
            key,
            provided = raw_value.is_some_and(|v| !v.is_empty()),
            defined = value.is_some(),
            "Resolved key"
        );

        if let Some(validator) = &attrs.validate {
            pending.push((key, defer_validator(key, validator)?));
        }
        check_enum(key, &attrs, value.as_ref())?;

        config.insert(key.to_string(), value);
    }

    for (key, validator) in &pending {
        run_validator(key, validator, &config)?;
    }
    tracing::debug!(
        keys = config.len(),
        validators = pending.len(),
        "Resolved configuration"
    );

    Ok(config)
}

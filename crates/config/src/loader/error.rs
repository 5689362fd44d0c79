//! Error types for configuration loading.
//!
//! Responsibilities:
//! - Define error variants for every way a load call or a guarded access can fail.
//! - Carry the offending key (or path) so callers can report it at startup.
//!
//! Does NOT handle:
//! - Recovery or retries. Every variant is fatal to the load call that produced it.
//!
//! Invariants:
//! - Dotenv errors NEVER include raw .env line contents to prevent secret leakage.
//! - `InvalidValue` includes the raw value because the caller supplied it for that key.

use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or accessing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A value failed type coercion or a required value was missing/empty.
    #[error("Invalid value for {key}: {value:?} ({message})")]
    InvalidValue {
        key: String,
        value: String,
        message: String,
    },

    /// The schema declares a type name that is not recognized.
    #[error("Invalid type for {key}: unknown type '{kind}'")]
    InvalidType { key: String, kind: String },

    /// The schema entry itself is malformed (bad `validate` or non-sequence `enum`).
    #[error("Invalid schema for {key}: {message}")]
    InvalidSchema { key: String, message: String },

    /// A custom validator or pattern rejected the resolved value.
    #[error("Validation failed for {key}")]
    ValidationFailed { key: String },

    /// The resolved value is not one of the allowed values.
    #[error("Value for {key} must be one of {allowed}, got {value}")]
    EnumViolation {
        key: String,
        value: String,
        allowed: String,
    },

    /// Access to a key the schema does not declare.
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    #[error("Failed to read schema file at {path}")]
    SchemaRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse schema: {0}")]
    SchemaParse(#[from] serde_json::Error),

    /// Failed to parse the `.env` file due to invalid syntax.
    ///
    /// SAFETY: This error only includes the byte index of the parse failure,
    /// NOT the offending line content, to prevent leaking secrets.
    #[error(
        "Failed to parse .env file at position {error_index}. Hint: set DOTENV_DISABLED=1 to skip .env loading"
    )]
    DotenvParse { error_index: usize },

    /// Failed to read the `.env` file due to an I/O error.
    #[error("Failed to read .env file: {kind}")]
    DotenvIo { kind: ErrorKind },

    /// Unknown dotenv error (future variants from dotenvy crate).
    ///
    /// SAFETY: This error does not include any raw dotenv content.
    #[error("Failed to load .env file. Hint: set DOTENV_DISABLED=1 to skip .env loading")]
    DotenvUnknown,
}

impl ConfigError {
    pub(crate) fn invalid_value(
        key: &str,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.into(),
            message: message.into(),
        }
    }

    pub(crate) fn invalid_schema(key: &str, message: impl Into<String>) -> Self {
        ConfigError::InvalidSchema {
            key: key.to_string(),
            message: message.into(),
        }
    }

    /// The configuration key this error is about, if it concerns a single key.
    pub fn key(&self) -> Option<&str> {
        match self {
            ConfigError::InvalidValue { key, .. }
            | ConfigError::InvalidType { key, .. }
            | ConfigError::InvalidSchema { key, .. }
            | ConfigError::ValidationFailed { key }
            | ConfigError::EnumViolation { key, .. } => Some(key),
            ConfigError::UnknownKey(key) => Some(key),
            _ => None,
        }
    }
}

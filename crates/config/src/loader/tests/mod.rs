//! Tests for the configuration loader.
//!
//! Responsibilities:
//! - Test per-key coercion, defaults, required-ness, and enum membership.
//! - Test deferred validators and their ordering.
//! - Test source precedence and `.env` file handling.
//!
//! Invariants:
//! - Tests that read or mutate process-global state (cwd/env) use `serial_test`
//!   and `global_test_lock()`.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::sync::Mutex;

use serde_json::Value;

use crate::loader::builder::{LoadOptions, load};
use crate::loader::error::ConfigError;
use crate::types::Schema;
use crate::view::Config;


/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

/// Empty in-memory object.
pub const NO_VALUES: [(&str, &str); 0] = [];

/// Load `schema` from an in-memory object only.
pub fn load_isolated<'a>(
    schema: &Schema,
    values: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> Result<Config, ConfigError> {
    load(schema, &LoadOptions::isolated().with_env_object(values))
}

/// Load a single key and return its resolved value.
pub fn load_one(schema: &Schema, key: &str, raw: &str) -> Result<Option<Value>, ConfigError> {
    let config = load_isolated(schema, [(key, raw)])?;
    Ok(config.get(key)?.cloned())
}

//! Load options and the load entry point.
//!
//! Responsibilities:
//! - Provide a builder-pattern `LoadOptions` selecting which raw sources are merged.
//! - Run a full load: merge sources, resolve the schema, wrap the result.
//!
//! Does NOT handle:
//! - Source reading details (delegated to sources.rs).
//! - Coercion and validation rules (delegated to engine.rs).
//!
//! Invariants / Assumptions:
//! - Defaults: env file enabled at `<cwd>/.env`, process environment merged, empty in-memory object.
//! - Every load builds a fresh raw layer and config; nothing is cached across calls.
//! - A load either returns a complete guarded config or a single error.

use std::collections::HashMap;

use super::engine::resolve;
use super::error::ConfigError;
use super::sources::{EnvFileSource, merge_sources};
use crate::types::Schema;
use crate::view::Config;

/// Which raw sources a load merges, lowest precedence first.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    env_object: HashMap<String, String>,
    env_file: EnvFileSource,
    process_env: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadOptions {
    /// Create options with the default sources enabled.
    pub fn new() -> Self {
        Self {
            env_object: HashMap::new(),
            env_file: EnvFileSource::Default,
            process_env: true,
        }
    }

    /// Options that read nothing but the in-memory object.
    pub fn isolated() -> Self {
        Self::new().with_env_file(false).with_process_env(false)
    }

    /// Set the in-memory object, the lowest-precedence layer.
    pub fn with_env_object<I, K, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env_object = values
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    /// Add a single in-memory value.
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_object.insert(key.into(), value.into());
        self
    }

    /// Enable, disable, or relocate the env file layer.
    ///
    /// Accepts `true`/`false` or a path.
    pub fn with_env_file(mut self, source: impl Into<EnvFileSource>) -> Self {
        self.env_file = source.into();
        self
    }

    /// Enable or disable merging the process environment.
    pub fn with_process_env(mut self, enabled: bool) -> Self {
        self.process_env = enabled;
        self
    }

    pub fn env_object(&self) -> &HashMap<String, String> {
        &self.env_object
    }

    pub fn env_file(&self) -> &EnvFileSource {
        &self.env_file
    }

    pub fn process_env(&self) -> bool {
        self.process_env
    }
}

/// Load configuration for `schema` from the sources selected by `options`.
///
/// # Errors
///
/// Returns the first failure encountered:
/// - env file read/parse errors (`DotenvParse`, `DotenvIo`)
/// - per-key errors (`InvalidValue`, `InvalidType`, `InvalidSchema`, `EnumViolation`)
/// - deferred validator rejections (`ValidationFailed`)
pub fn load(schema: &Schema, options: &LoadOptions) -> Result<Config, ConfigError> {
    let raw = merge_sources(options)?;
    let resolved = resolve(schema, &raw)?;
    Ok(Config::new(resolved))
}

impl Schema {
    /// Load configuration for this schema. Shorthand for [`load`].
    pub fn load(&self, options: &LoadOptions) -> Result<Config, ConfigError> {
        load(self, options)
    }
}

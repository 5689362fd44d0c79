//! Schema and source resolution from CLI arguments.
//!
//! Responsibilities:
//! - Read the schema document named by `--schema` / `ENVGUARD_SCHEMA`.
//! - Translate source flags into `LoadOptions` and run the load.
//!
//! Does NOT handle:
//! - Output formatting (see `formatters` module).

use anyhow::{Context, Result};
use envguard_config::{Config, EnvFileSource, LoadOptions, Schema};
use std::path::Path;

use crate::args::SourceArgs;

/// Build load options from the source flags.
pub(crate) fn load_options(args: &SourceArgs) -> LoadOptions {
    let env_file = match (&args.env_file, args.no_env_file) {
        (_, true) => EnvFileSource::Disabled,
        (Some(path), false) => EnvFileSource::Path(path.clone()),
        (None, false) => EnvFileSource::Default,
    };

    LoadOptions::new()
        .with_env_object(args.values.iter().cloned())
        .with_env_file(env_file)
        .with_process_env(!args.no_process_env)
}

/// Read the schema and load configuration against it.
pub(crate) fn load_config(schema_path: Option<&Path>, args: &SourceArgs) -> Result<Config> {
    let schema_path =
        schema_path.context("No schema given. Pass --schema FILE or set ENVGUARD_SCHEMA")?;
    let schema = Schema::from_path(schema_path)
        .with_context(|| format!("Failed to read schema {}", schema_path.display()))?;
    tracing::debug!(path = %schema_path.display(), keys = schema.len(), "Loaded schema");

    let config = schema
        .load(&load_options(args))
        .context("Failed to load configuration")?;
    Ok(config)
}

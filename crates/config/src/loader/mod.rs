//! Configuration loader for schema-declared keys.
//!
//! Responsibilities:
//! - Merge raw string values from an in-memory object, a `.env` file, and the process environment.
//! - Coerce each schema key to its declared type, apply defaults, and run validators.
//! - Return the result wrapped in a guarded `Config`.
//!
//! Does NOT handle:
//! - Watching sources for changes. Each load is a one-shot snapshot.
//!
//! Invariants / Assumptions:
//! - Process environment values take precedence over `.env` values, which take precedence
//!   over the in-memory object.
//! - The `DOTENV_DISABLED` variable is checked before the `.env` file is read.

mod builder;
mod engine;
mod error;
mod sources;

pub use builder::{LoadOptions, load};
pub use engine::{coerce, parse, resolve, value_to_string};
pub use error::ConfigError;
pub use sources::{EnvFileSource, RawValues, merge_sources, process_env, read_env_file};

#[cfg(test)]
mod tests;

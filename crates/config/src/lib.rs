//! Schema-driven configuration loading for envguard.
//!
//! This crate gathers raw string values from layered sources, coerces each
//! schema-declared key to its type, runs validators, and returns a guarded
//! view that rejects access to undeclared keys.

pub mod constants;
mod loader;
pub mod types;
mod view;

pub use loader::{
    ConfigError, EnvFileSource, LoadOptions, RawValues, coerce, load, merge_sources, parse,
    process_env, read_env_file, resolve, value_to_string,
};
pub use types::{
    Attributes, DefaultValue, ResolvedConfig, Schema, SchemaEntry, Validator, ValueType,
};
pub use view::Config;

#[cfg(test)]
pub(crate) mod test_util {
    use std::sync::{Mutex, OnceLock};

    pub fn global_test_lock() -> &'static Mutex<()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
    }
}

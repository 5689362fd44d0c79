//! Get command implementation.
//!
//! Prints the value followed by a newline; an unset key prints nothing.

use anyhow::Result;
use envguard_config::Config;

use crate::formatters::format_value;

pub fn run(config: &Config, key: &str) -> Result<()> {
    if let Some(value) = config.get(key)? {
        println!("{}", format_value(value));
    } else {
        tracing::debug!(key, "Key is declared but unset");
    }
    Ok(())
}

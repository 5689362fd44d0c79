//! Check command implementation.

use anyhow::Result;
use envguard_config::Config;
use tracing::info;

pub fn run(config: &Config) -> Result<()> {
    let defined = config.iter().filter(|(_, v)| v.is_some()).count();
    info!(keys = config.len(), defined, "Configuration is valid");
    println!(
        "OK: {} keys resolved ({} defined, {} unset)",
        config.len(),
        defined,
        config.len() - defined
    );
    Ok(())
}

//! Print command implementation.

use anyhow::{Context, Result};
use envguard_config::Config;
use std::path::PathBuf;

use crate::formatters::{OutputFormat, format_config, write_to_file};

pub fn run(config: &Config, output_format: &str, output_file: Option<PathBuf>) -> Result<()> {
    let format = OutputFormat::from_str(output_format)?;
    let output = format_config(config, format)?;

    if let Some(ref path) = output_file {
        write_to_file(&output, path)
            .with_context(|| format!("Failed to write output to {}", path.display()))?;
        eprintln!(
            "Configuration written to {} ({:?} format)",
            path.display(),
            format
        );
    } else {
        print!("{}", output);
    }

    Ok(())
}

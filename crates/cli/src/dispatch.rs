//! Command dispatch logic.
//!
//! Responsibilities:
//! - Load the configuration once for the invoked command.
//! - Route parsed CLI arguments to the matching command handler.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Building load options (see `config_context` module).

use anyhow::Result;

use crate::args::{Cli, Commands};
use crate::commands;
use crate::config_context::load_config;

/// Dispatch CLI commands to their respective handlers.
pub(crate) fn run_command(cli: Cli) -> Result<()> {
    let config = load_config(cli.schema.as_deref(), &cli.sources)?;

    match cli.command {
        Commands::Check => commands::check::run(&config),
        Commands::Print {
            output,
            output_file,
        } => commands::print::run(&config, &output, output_file),
        Commands::Get { key } => commands::get::run(&config, &key),
    }
}

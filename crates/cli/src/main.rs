//! envguard - load and validate environment configuration against a schema.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Load configuration through `envguard-config` and run the requested command.
//! - Map failures to structured exit codes.
//!
//! Does NOT handle:
//! - Coercion or validation rules (see `crates/config`).
//!
//! Invariants:
//! - Logs go to stderr; stdout carries only command output.
//! - Any load failure exits non-zero with a single error message.

mod args;
mod commands;
mod config_context;
mod dispatch;
mod error;
mod formatters;

use args::Cli;
use clap::Parser;
use dispatch::run_command;
use error::{ExitCode, ExitCodeExt};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let exit_code = match run_command(cli) {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("{:#}", e);
            e.exit_code()
        }
    };

    std::process::exit(exit_code.as_i32());
}

//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Parse `KEY=VALUE` pairs for the in-memory source layer.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not build load options (see `config_context` module).

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "envguard")]
#[command(about = "Load and validate environment configuration against a schema", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  envguard --schema schema.json check\n  envguard --schema schema.json --no-process-env print --output dotenv\n  envguard --schema schema.json --set PORT=8080 get PORT\n"
)]
pub struct Cli {
    /// Path to the JSON schema document
    #[arg(short, long, global = true, env = "ENVGUARD_SCHEMA", value_name = "FILE")]
    pub schema: Option<PathBuf>,

    #[command(flatten)]
    pub sources: SourceArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Flags selecting the raw value sources.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Read this env file instead of `.env` in the working directory
    #[arg(long, global = true, value_name = "FILE", conflicts_with = "no_env_file")]
    pub env_file: Option<PathBuf>,

    /// Do not read any env file
    #[arg(long, global = true)]
    pub no_env_file: bool,

    /// Do not merge the process environment
    #[arg(long, global = true)]
    pub no_process_env: bool,

    /// Supply a value in the lowest-precedence layer (repeatable)
    #[arg(long = "set", global = true, value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub values: Vec<(String, String)>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load the configuration and report whether it is valid
    Check,

    /// Print the resolved configuration
    Print {
        /// Output format (json, dotenv)
        #[arg(short, long, default_value = "json")]
        output: String,

        /// Write to this file instead of stdout
        #[arg(long, value_name = "FILE")]
        output_file: Option<PathBuf>,
    },

    /// Print the resolved value of one key
    Get {
        /// Key declared in the schema
        key: String,
    },
}

/// Parse a `KEY=VALUE` argument. The value may be empty and may contain `=`.
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid KEY=VALUE: no '=' found in '{s}'"))?;
    if key.is_empty() {
        return Err(format!("invalid KEY=VALUE: empty key in '{s}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

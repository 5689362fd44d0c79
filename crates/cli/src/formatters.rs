//! Output formatters for resolved configuration.
//!
//! Provides JSON and dotenv renderings of a loaded `Config`.

use anyhow::Result;
use envguard_config::{Config, value_to_string};
use serde_json::Value;
use std::path::Path;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Dotenv,
}

impl OutputFormat {
    /// Parse from string.
    pub fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "dotenv" | "env" => Ok(OutputFormat::Dotenv),
            _ => anyhow::bail!("Invalid output format: {}. Valid options: json, dotenv", s),
        }
    }
}

/// Render the whole configuration. Undefined values are omitted.
pub fn format_config(config: &Config, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(config)?)),
        OutputFormat::Dotenv => Ok(config
            .iter()
            .filter_map(|(key, value)| value.map(|v| format!("{}={}\n", key, dotenv_value(v))))
            .collect()),
    }
}

/// Render a single value the way `get` prints it: strings bare, everything else as JSON.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Render a value so that reading it back through a `.env` file yields the same raw string.
fn dotenv_value(value: &Value) -> String {
    let raw = match value {
        Value::Array(items) if items.iter().all(Value::is_string) => value_to_string(Some(value)),
        Value::String(_) | Value::Number(_) | Value::Bool(_) => value_to_string(Some(value)),
        other => other.to_string(),
    };
    if needs_quotes(&raw) {
        format!("\"{}\"", escape_double_quoted(&raw))
    } else {
        raw
    }
}

fn needs_quotes(raw: &str) -> bool {
    raw.chars().any(|c| {
        !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | ',' | '/' | ':' | '@' | '+'))
    })
}

fn escape_double_quoted(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '$' => out.push_str("\\$"),
            other => out.push(other),
        }
    }
    out
}

/// Write output to a file, creating parent directories if needed.
pub fn write_to_file(content: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

//! Shared test utilities for envguard integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory that prevents dotenv loading.
//! - Write schema and env fixtures into temp directories.
//!
//! Invariants / Assumptions:
//! - All integration tests using this helper will be hermetic by default.
//! - `ENVGUARD_SCHEMA` is cleared so that only explicit `--schema` arguments apply.

use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Returns a hermetic `envguard` command for integration testing.
///
/// It ensures:
/// - `DOTENV_DISABLED=1` is set to prevent local `.env` contamination.
/// - `ENVGUARD_SCHEMA` and `RUST_LOG` are cleared to avoid host leakage.
pub fn envguard_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("envguard");

    // Hermeticity: prevent loading local .env
    cmd.env("DOTENV_DISABLED", "1");

    cmd.env_remove("ENVGUARD_SCHEMA").env_remove("RUST_LOG");

    cmd
}

/// Write `content` as `schema.json` in `dir` and return its path.
pub fn write_schema(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("schema.json");
    fs::write(&path, content).expect("Failed to write schema");
    path
}

/// Schema used by most CLI tests.
#[allow(dead_code)]
pub const APP_SCHEMA: &str = r#"{
    "EG_TEST_PORT": {"type": "number", "default": 3000},
    "EG_TEST_DEBUG": "boolean",
    "EG_TEST_HOSTS": "array",
    "EG_TEST_MODE": {"type": "string", "default": "dev", "enum": ["dev", "prod"]}
}"#;

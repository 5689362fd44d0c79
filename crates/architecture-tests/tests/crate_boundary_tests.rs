//! Architecture tests for the library/CLI split.
//!
//! Invariants:
//! - `envguard-config` never depends on the CLI stack (clap, anyhow, tracing-subscriber).
//! - Library code never writes to stdout/stderr directly; it logs through `tracing`.

mod common;

use common::{find_workspace_root, workspace_rust_files};
use std::fs;

const CLI_ONLY_CRATES: &[&str] = &["clap", "anyhow", "tracing-subscriber"];

#[test]
fn test_config_crate_has_no_cli_dependencies() {
    let root = find_workspace_root();
    let manifest = fs::read_to_string(root.join("crates/config/Cargo.toml"))
        .expect("Failed to read crates/config/Cargo.toml");

    let offending: Vec<&str> = CLI_ONLY_CRATES
        .iter()
        .copied()
        .filter(|name| {
            manifest
                .lines()
                .any(|line| line.trim_start().starts_with(&format!("{} ", name)))
        })
        .collect();

    assert!(
        offending.is_empty(),
        "envguard-config must not depend on CLI crates: {:?}",
        offending
    );
}

#[test]
fn test_config_crate_does_not_print() {
    let root = find_workspace_root();
    let config_src = root.join("crates").join("config").join("src");
    let mut violations = Vec::new();

    for path in workspace_rust_files(&root) {
        if !path.starts_with(&config_src) {
            continue;
        }
        let content = fs::read_to_string(&path).unwrap_or_default();
        for (i, line) in content.lines().enumerate() {
            let trimmed = line.trim_start();
            if trimmed.starts_with("//") {
                continue;
            }
            if trimmed.contains("println!(") || trimmed.contains("eprintln!(") {
                violations.push(format!("{}:{}", path.display(), i + 1));
            }
        }
    }

    assert!(
        violations.is_empty(),
        "Library code must log via tracing instead of printing:\n{}",
        violations.join("\n")
    );
}

//! Raw value sources and their merge order.
//!
//! Responsibilities:
//! - Read a dotenv-style file into a key/value layer without touching the process environment.
//! - Snapshot the process environment into a key/value layer.
//! - Merge the in-memory, file, and process layers with strict precedence.
//!
//! Does NOT handle:
//! - Type coercion or schema rules (see engine.rs).
//!
//! Invariants:
//! - Precedence (lowest to highest): in-memory object, env file, process environment.
//! - A missing env file contributes nothing; only read/parse failures of an existing file are errors.
//! - The `DOTENV_DISABLED` variable is checked before the env file is opened.
//! - Values are neither trimmed nor otherwise rewritten; `$` references are not expanded.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::builder::LoadOptions;
use super::error::ConfigError;
use crate::constants::{DEFAULT_ENV_FILE_NAME, DOTENV_DISABLED_VAR};

/// Merged key to raw string mapping, before coercion.
pub type RawValues = HashMap<String, String>;

/// Where (and whether) to read a dotenv-style file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EnvFileSource {
    /// Do not read any file.
    Disabled,
    /// Read `.env` from the current working directory.
    #[default]
    Default,
    /// Read the file at this path.
    Path(PathBuf),
}

impl EnvFileSource {
    /// The path to read, if file reading is enabled.
    pub fn resolve_path(&self) -> Result<Option<PathBuf>, ConfigError> {
        match self {
            EnvFileSource::Disabled => Ok(None),
            EnvFileSource::Default => {
                let cwd = std::env::current_dir().map_err(|e| ConfigError::DotenvIo {
                    kind: e.kind(),
                })?;
                Ok(Some(cwd.join(DEFAULT_ENV_FILE_NAME)))
            }
            EnvFileSource::Path(path) => Ok(Some(path.clone())),
        }
    }
}

impl From<bool> for EnvFileSource {
    fn from(enabled: bool) -> Self {
        if enabled {
            EnvFileSource::Default
        } else {
            EnvFileSource::Disabled
        }
    }
}

impl From<PathBuf> for EnvFileSource {
    fn from(path: PathBuf) -> Self {
        EnvFileSource::Path(path)
    }
}

impl From<&Path> for EnvFileSource {
    fn from(path: &Path) -> Self {
        EnvFileSource::Path(path.to_path_buf())
    }
}

/// Check if dotenv loading is disabled via environment variable.
fn dotenv_disabled() -> bool {
    matches!(
        std::env::var(DOTENV_DISABLED_VAR).ok().as_deref(),
        Some("true") | Some("1")
    )
}

/// Map a dotenv error without carrying any of the file's contents along.
fn map_dotenv_error(err: dotenvy::Error) -> ConfigError {
    match err {
        dotenvy::Error::LineParse(_, idx) => ConfigError::DotenvParse { error_index: idx },
        dotenvy::Error::Io(io_err) => ConfigError::DotenvIo {
            kind: io_err.kind(),
        },
        _ => ConfigError::DotenvUnknown,
    }
}

/// Mask every `$` that dotenvy would treat as the start of a substitution.
///
/// dotenvy expands `$NAME` and `${NAME}` from the process environment with no
/// way to opt out. A `$` preceded by an odd run of backslashes is already an
/// escape and is left alone. Inside single quotes dotenvy never substitutes,
/// so masking there is harmless.
fn mask_substitutions(content: &str, mask: char) -> String {
    let mut out = String::with_capacity(content.len());
    let mut backslashes = 0usize;
    for c in content.chars() {
        match c {
            '$' if backslashes % 2 == 0 => out.push(mask),
            other => out.push(other),
        }
        backslashes = if c == '\\' { backslashes + 1 } else { 0 };
    }
    out
}

/// First private-use character that does not occur in `content`.
fn pick_mask(content: &str) -> Option<char> {
    ('\u{E000}'..='\u{F8FF}').find(|c| !content.contains(*c))
}

/// Read a dotenv-style file into a fresh mapping.
///
/// Returns an empty mapping if the file does not exist. Values are taken
/// literally: `$NAME` and `${NAME}` are not expanded, neither from the process
/// environment nor from earlier lines.
///
/// # Errors
///
/// - `ConfigError::DotenvParse` if the file exists but has invalid syntax.
/// - `ConfigError::DotenvIo` if the file exists but cannot be read.
///
/// SAFETY: Error messages never include raw .env line contents to prevent secret leakage.
pub fn read_env_file(path: &Path) -> Result<RawValues, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "No env file found, skipping");
            return Ok(RawValues::new());
        }
        Err(e) => return Err(ConfigError::DotenvIo { kind: e.kind() }),
    };

    let Some(mask) = pick_mask(&content) else {
        return Err(ConfigError::DotenvUnknown);
    };
    let masked = mask_substitutions(&content, mask);
    let unmask = |s: String| {
        if s.contains(mask) {
            s.replace(mask, "$")
        } else {
            s
        }
    };

    let mut values = RawValues::new();
    for item in dotenvy::from_read_iter(masked.as_bytes()) {
        let (key, value) = item.map_err(map_dotenv_error)?;
        values.insert(unmask(key), unmask(value));
    }
    tracing::debug!(path = %path.display(), count = values.len(), "Read env file");
    Ok(values)
}

/// Snapshot the process environment, skipping entries that are not valid UTF-8.
pub fn process_env() -> RawValues {
    std::env::vars_os()
        .filter_map(|(key, value)| match (key.into_string(), value.into_string()) {
            (Ok(key), Ok(value)) => Some((key, value)),
            (Ok(key), Err(_)) => {
                tracing::debug!(key = %key, "Skipping non UTF-8 environment value");
                None
            }
            (Err(_), _) => {
                tracing::debug!("Skipping non UTF-8 environment variable name");
                None
            }
        })
        .collect()
}

/// Merge all enabled sources into one flat mapping.
///
/// Later layers overwrite earlier ones on key collision.
pub fn merge_sources(options: &LoadOptions) -> Result<RawValues, ConfigError> {
    let mut merged: RawValues = options.env_object().clone();
    tracing::debug!(count = merged.len(), "Merged in-memory layer");

    if dotenv_disabled() {
        tracing::debug!("{} is set, skipping env file", DOTENV_DISABLED_VAR);
    } else if let Some(path) = options.env_file().resolve_path()? {
        merged.extend(read_env_file(&path)?);
    }

    if options.process_env() {
        let env = process_env();
        tracing::debug!(count = env.len(), "Merged process environment layer");
        merged.extend(env);
    }

    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_env_file_source_conversions() {
        assert_eq!(EnvFileSource::from(true), EnvFileSource::Default);
        assert_eq!(EnvFileSource::from(false), EnvFileSource::Disabled);
        assert_eq!(
            EnvFileSource::from(PathBuf::from("/etc/app.env")),
            EnvFileSource::Path(PathBuf::from("/etc/app.env"))
        );
        assert_eq!(EnvFileSource::default(), EnvFileSource::Default);
    }

    #[test]
    fn test_disabled_source_has_no_path() {
        assert_eq!(EnvFileSource::Disabled.resolve_path().unwrap(), None);
    }

    #[test]
    fn test_read_env_file_missing_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let values = read_env_file(&temp_dir.path().join("nope.env")).unwrap();
        assert!(values.is_empty());
    }

    #[test]
    fn test_read_env_file_keeps_values_verbatim() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".env");
        fs::write(&path, "HOST=example.com\nLIST='a, b'\nEMPTY=\n").unwrap();

        let values = read_env_file(&path).unwrap();
        assert_eq!(values.get("HOST").map(String::as_str), Some("example.com"));
        assert_eq!(values.get("LIST").map(String::as_str), Some("a, b"));
        assert_eq!(values.get("EMPTY").map(String::as_str), Some(""));
    }

    #[test]
    #[serial]
    fn test_read_env_file_keeps_dollar_signs_literal() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".env");
        fs::write(
            &path,
            concat!(
                "EARLIER=first\n",
                "PLAIN=pa$$word\n",
                "BRACED=\"${EARLIER}-${HOME}\"\n",
                "SINGLE='$EARLIER'\n",
                "ESCAPED=\\$EARLIER\n",
                "DOUBLE_BACKSLASH=\"\\\\$EARLIER\"\n",
            ),
        )
        .unwrap();

        temp_env::with_var("HOME", Some("/home/leak"), || {
            let values = read_env_file(&path).unwrap();
            let get = |key: &str| values.get(key).map(String::as_str);
            assert_eq!(get("PLAIN"), Some("pa$$word"));
            assert_eq!(get("BRACED"), Some("${EARLIER}-${HOME}"));
            assert_eq!(get("SINGLE"), Some("$EARLIER"));
            assert_eq!(get("ESCAPED"), Some("$EARLIER"));
            assert_eq!(get("DOUBLE_BACKSLASH"), Some("\\$EARLIER"));
        });
    }

    #[test]
    fn test_mask_substitutions_respects_escapes() {
        assert_eq!(mask_substitutions("a$b", '#'), "a#b");
        assert_eq!(mask_substitutions(r"a\$b", '#'), r"a\$b");
        assert_eq!(mask_substitutions(r"a\\$b", '#'), r"a\\#b");
        assert_eq!(pick_mask("plain"), Some('\u{E000}'));
    }

    #[test]
    #[serial]
    fn test_read_env_file_does_not_touch_process_env() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".env");
        fs::write(&path, "_ENVGUARD_SOURCES_ONLY_IN_FILE=1\n").unwrap();

        temp_env::with_var_unset("_ENVGUARD_SOURCES_ONLY_IN_FILE", || {
            read_env_file(&path).unwrap();
            assert!(std::env::var("_ENVGUARD_SOURCES_ONLY_IN_FILE").is_err());
        });
    }

    #[test]
    #[serial]
    fn test_process_env_snapshot_contains_set_var() {
        temp_env::with_var("_ENVGUARD_SOURCES_SNAPSHOT", Some("present"), || {
            let env = process_env();
            assert_eq!(
                env.get("_ENVGUARD_SOURCES_SNAPSHOT").map(String::as_str),
                Some("present")
            );
        });
    }
}

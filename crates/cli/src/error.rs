//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish failures.
//! - Map `ConfigError` variants to exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//!
//! Invariants:
//! - Exit codes 1-4 are reserved for specific error categories.

use envguard_config::ConfigError;

/// Structured exit codes for envguard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - configuration loaded.
    Success = 0,

    /// General error - unhandled failure, including unreadable `.env` files.
    GeneralError = 1,

    /// Schema error - the schema file is missing, malformed, or declares bad rules.
    ///
    /// Scripts should fix the schema; the environment is not at fault.
    SchemaError = 2,

    /// Validation error - a value is missing, malformed, or rejected by a rule.
    ///
    /// Scripts should fix the environment and not retry unchanged.
    ValidationError = 3,

    /// Unknown key - a key was requested that the schema does not declare.
    UnknownKey = 4,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&ConfigError> for ExitCode {
    fn from(err: &ConfigError) -> Self {
        match err {
            ConfigError::SchemaRead { .. }
            | ConfigError::SchemaParse(_)
            | ConfigError::InvalidType { .. }
            | ConfigError::InvalidSchema { .. } => ExitCode::SchemaError,

            ConfigError::InvalidValue { .. }
            | ConfigError::ValidationFailed { .. }
            | ConfigError::EnumViolation { .. } => ExitCode::ValidationError,

            ConfigError::UnknownKey(_) => ExitCode::UnknownKey,

            ConfigError::DotenvParse { .. }
            | ConfigError::DotenvIo { .. }
            | ConfigError::DotenvUnknown => ExitCode::GeneralError,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Extract the appropriate exit code from this error.
    ///
    /// Returns ExitCode::GeneralError if no `ConfigError` is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        self.chain()
            .find_map(|cause| cause.downcast_ref::<ConfigError>())
            .map_or(ExitCode::GeneralError, ExitCode::from)
    }
}

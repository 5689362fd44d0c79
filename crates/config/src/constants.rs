//! Centralized constants for the envguard workspace.

// =============================================================================
// Source Merging
// =============================================================================

/// File name of the dotenv-style file read from the working directory by default.
pub const DEFAULT_ENV_FILE_NAME: &str = ".env";

/// Environment variable that disables the dotenv file layer when set to `1` or `true`.
pub const DOTENV_DISABLED_VAR: &str = "DOTENV_DISABLED";

// =============================================================================
// Guarded View
// =============================================================================

/// Property names looked up by generic inspection and serialization tooling.
///
/// Reads of these names on a guarded config return an absent value instead of
/// failing with `UnknownKey`, unless the schema declares them.
pub const INTROSPECTION_KEYS: &[&str] = &[
    "toJSON",
    "inspect",
    "then",
    "constructor",
    "nodeType",
    "valueOf",
    "toString",
    "asymmetricMatch",
    "$$typeof",
];

// =============================================================================
// Type Coercion
// =============================================================================

/// Separator between items of an `array` value.
pub const ARRAY_SEPARATOR: char = ',';

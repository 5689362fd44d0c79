//! CLI command implementations.

pub mod check;
pub mod get;
pub mod print;

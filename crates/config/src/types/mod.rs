//! Schema and value type definitions.
//!
//! Responsibilities:
//! - Define the declared value types, attribute records, and the schema itself.
//! - Define the resolved configuration mapping handed to validators.
//!
//! Does NOT handle:
//! - Merging raw sources or coercing values (see `loader` module).
//! - Guarded access to a loaded configuration (see `view` module).
//!
//! Invariants:
//! - A resolved value of `None` means "undefined", distinct from JSON `null`.

mod attributes;
mod schema;
mod value_type;

use indexmap::IndexMap;
use serde_json::Value;

pub use attributes::{Attributes, DefaultFactory, DefaultValue, Predicate, Validator};
pub use schema::{Schema, SchemaEntry};
pub use value_type::{UnknownValueType, ValueType};

/// Key to coerced value, in schema declaration order.
pub type ResolvedConfig = IndexMap<String, Option<Value>>;

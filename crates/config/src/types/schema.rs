//! Schema declarations.
//!
//! Responsibilities:
//! - Define `SchemaEntry` (bare type name or full attribute record).
//! - Define `Schema`, an ordered mapping from configuration key to entry.
//! - Read schemas from JSON documents.
//!
//! Does NOT handle:
//! - Loading configuration against a schema (see `loader`).
//!
//! Invariants:
//! - Keys keep declaration order; deferred validators run in this order.
//! - A schema is read-only once a load begins (`load` borrows it immutably).

use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use super::attributes::Attributes;
use super::value_type::ValueType;
use crate::loader::ConfigError;

/// One schema entry, either a bare type name or a full attribute record.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SchemaEntry {
    Shorthand(String),
    Full(Attributes),
}

impl SchemaEntry {
    /// Normalize shorthand to the full attribute form.
    pub fn normalize(&self) -> Attributes {
        match self {
            SchemaEntry::Shorthand(kind) => Attributes::named(kind.clone()),
            SchemaEntry::Full(attrs) => attrs.clone(),
        }
    }
}

impl From<ValueType> for SchemaEntry {
    fn from(kind: ValueType) -> Self {
        SchemaEntry::Shorthand(kind.as_str().to_string())
    }
}

impl From<Attributes> for SchemaEntry {
    fn from(attrs: Attributes) -> Self {
        SchemaEntry::Full(attrs)
    }
}

/// Ordered declaration of expected configuration keys.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    entries: IndexMap<String, SchemaEntry>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `key` with a bare type.
    pub fn shorthand(self, key: impl Into<String>, kind: ValueType) -> Self {
        self.entry(key, kind)
    }

    /// Declare `key` with a full attribute record.
    pub fn field(self, key: impl Into<String>, attrs: Attributes) -> Self {
        self.entry(key, attrs)
    }

    /// Declare `key` with any entry form. Redeclaring a key replaces it in place.
    pub fn entry(mut self, key: impl Into<String>, entry: impl Into<SchemaEntry>) -> Self {
        self.entries.insert(key.into(), entry.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&SchemaEntry> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemaEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse a schema from a JSON object document.
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Read and parse a JSON schema file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::SchemaRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }
}

impl<K, E> FromIterator<(K, E)> for Schema
where
    K: Into<String>,
    E: Into<SchemaEntry>,
{
    fn from_iter<T: IntoIterator<Item = (K, E)>>(iter: T) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, e)| (k.into(), e.into()))
                .collect(),
        }
    }
}

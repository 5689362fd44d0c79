//! Guarded configuration view.
//!
//! Responsibilities:
//! - Wrap a resolved configuration so only schema-declared keys can be read or written.
//! - Provide typed accessors and JSON serialization for loaded values.
//!
//! Does NOT handle:
//! - Re-validating values on write. Post-load mutation is unchecked.
//!
//! Invariants:
//! - The key set is fixed at load time; `set` never adds a key.
//! - Reads of introspection names (see `INTROSPECTION_KEYS`) return `Ok(None)`
//!   unless the schema declares them. Writes to them are rejected.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use crate::constants::INTROSPECTION_KEYS;
use crate::loader::ConfigError;
use crate::types::ResolvedConfig;

/// Loaded configuration, restricted to the keys its schema declares.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    values: ResolvedConfig,
}

impl Config {
    pub(crate) fn new(values: ResolvedConfig) -> Self {
        Self { values }
    }

    /// Read the resolved value for `key`.
    ///
    /// Returns `Ok(None)` for a declared key whose value is undefined.
    ///
    /// # Errors
    ///
    /// `ConfigError::UnknownKey` if `key` is not declared in the schema.
    pub fn get(&self, key: &str) -> Result<Option<&Value>, ConfigError> {
        match self.values.get(key) {
            Some(value) => Ok(value.as_ref()),
            None if INTROSPECTION_KEYS.contains(&key) => Ok(None),
            None => Err(ConfigError::UnknownKey(key.to_string())),
        }
    }

    /// Overwrite the value of a declared key. The new value is not validated.
    ///
    /// # Errors
    ///
    /// `ConfigError::UnknownKey` if `key` is not declared in the schema.
    pub fn set(&mut self, key: &str, value: Option<Value>) -> Result<(), ConfigError> {
        match self.values.get_mut(key) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(ConfigError::UnknownKey(key.to_string())),
        }
    }

    pub fn get_str(&self, key: &str) -> Result<Option<&str>, ConfigError> {
        self.get_typed(key, "a string", Value::as_str)
    }

    pub fn get_i64(&self, key: &str) -> Result<Option<i64>, ConfigError> {
        self.get_typed(key, "an integer", Value::as_i64)
    }

    pub fn get_bool(&self, key: &str) -> Result<Option<bool>, ConfigError> {
        self.get_typed(key, "a boolean", Value::as_bool)
    }

    /// Read an `array` value as a list of strings.
    pub fn get_array(&self, key: &str) -> Result<Option<Vec<&str>>, ConfigError> {
        self.get_typed(key, "an array of strings", |value| {
            value
                .as_array()?
                .iter()
                .map(Value::as_str)
                .collect::<Option<Vec<_>>>()
        })
    }

    fn get_typed<'a, T>(
        &'a self,
        key: &str,
        expected: &str,
        extract: impl FnOnce(&'a Value) -> Option<T>,
    ) -> Result<Option<T>, ConfigError> {
        match self.get(key)? {
            None => Ok(None),
            Some(value) => extract(value).map(Some).ok_or_else(|| {
                ConfigError::invalid_value(key, value.to_string(), format!("is not {expected}"))
            }),
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Declared keys, in schema order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Value>)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_inner(self) -> ResolvedConfig {
        self.values
    }
}

/// Serializes as an object in schema order; undefined entries are omitted.
impl Serialize for Config {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let defined = self.values.iter().filter(|(_, v)| v.is_some()).count();
        let mut map = serializer.serialize_map(Some(defined))?;
        for (key, value) in &self.values {
            if let Some(value) = value {
                map.serialize_entry(key, value)?;
            }
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Config {
        let mut values = ResolvedConfig::new();
        values.insert("PORT".to_string(), Some(json!(3000)));
        values.insert("FLAG".to_string(), None);
        values.insert("HOSTS".to_string(), Some(json!(["a", "b"])));
        values.insert("NAME".to_string(), Some(json!("svc")));
        Config::new(values)
    }

    #[test]
    fn test_get_declared_and_undefined_keys() {
        let config = sample();
        assert_eq!(config.get("PORT").unwrap(), Some(&json!(3000)));
        assert_eq!(config.get("FLAG").unwrap(), None);
    }

    #[test]
    fn test_get_unknown_key_fails() {
        let config = sample();
        match config.get("PROT") {
            Err(ConfigError::UnknownKey(key)) => assert_eq!(key, "PROT"),
            other => panic!("Expected UnknownKey, got {:?}", other),
        }
    }

    #[test]
    fn test_introspection_names_read_as_absent() {
        let config = sample();
        for name in INTROSPECTION_KEYS {
            assert_eq!(config.get(name).unwrap(), None, "{name} should pass through");
        }
    }

    #[test]
    fn test_introspection_names_cannot_be_written() {
        let mut config = sample();
        assert!(matches!(
            config.set("toJSON", Some(json!(1))),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(!config.contains_key("toJSON"));
    }

    #[test]
    fn test_set_overwrites_without_validation() {
        let mut config = sample();
        config.set("PORT", Some(json!("not a number"))).unwrap();
        assert_eq!(config.get("PORT").unwrap(), Some(&json!("not a number")));

        config.set("NAME", None).unwrap();
        assert_eq!(config.get("NAME").unwrap(), None);
    }

    #[test]
    fn test_set_unknown_key_fails_and_does_not_insert() {
        let mut config = sample();
        assert!(matches!(
            config.set("EXTRA", Some(json!(true))),
            Err(ConfigError::UnknownKey(_))
        ));
        assert_eq!(config.len(), 4);
        assert!(matches!(config.get("EXTRA"), Err(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn test_typed_accessors() {
        let config = sample();
        assert_eq!(config.get_i64("PORT").unwrap(), Some(3000));
        assert_eq!(config.get_bool("FLAG").unwrap(), None);
        assert_eq!(config.get_array("HOSTS").unwrap(), Some(vec!["a", "b"]));
        assert_eq!(config.get_str("NAME").unwrap(), Some("svc"));
        assert!(matches!(
            config.get_bool("PORT"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            config.get_str("MISSING"),
            Err(ConfigError::UnknownKey(_))
        ));
    }

    #[test]
    fn test_serialize_omits_undefined_in_schema_order() {
        let config = sample();
        let rendered = serde_json::to_string(&config).unwrap();
        assert_eq!(rendered, r#"{"PORT":3000,"HOSTS":["a","b"],"NAME":"svc"}"#);
    }
}

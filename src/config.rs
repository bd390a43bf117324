//! Flat string-keyed backend configuration.
//!
//! Every backend is configured from the same shape: a map of string keys to
//! string values, typically deserialized from an application settings file.
//! `BackendConfig` wraps that map with the handful of typed accessors the
//! backends need.

use std::collections::HashMap;

use crate::error::MailError;

/// A flat string-keyed configuration map for a backend.
///
/// ```
/// use herald::BackendConfig;
///
/// let config = BackendConfig::new()
///     .with("Domain", "mg.example.com")
///     .with("PrivateKey", "key-xxxx");
///
/// assert_eq!(config.get("Domain"), Some("mg.example.com"));
/// assert!(config.require("PublicKey").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct BackendConfig(HashMap<String, String>);

impl BackendConfig {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a key, builder-style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Set a key in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Look up a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Look up a key, requiring it to be present and non-empty.
    pub fn require(&self, key: &str) -> Result<&str, MailError> {
        match self.get(key) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(MailError::Configuration(format!(
                "config key '{}' not set",
                key
            ))),
        }
    }

    /// Look up a key with a fallback default.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        match self.get(key) {
            Some(value) if !value.is_empty() => value,
            _ => default,
        }
    }

    /// Look up a boolean key.
    ///
    /// Accepts `1, t, T, TRUE, true, True` as true. Anything else, including
    /// an absent key or an unparseable value, is false.
    pub fn get_bool(&self, key: &str) -> bool {
        matches!(
            self.get(key),
            Some("1") | Some("t") | Some("T") | Some("TRUE") | Some("true") | Some("True")
        )
    }
}

impl From<HashMap<String, String>> for BackendConfig {
    fn from(map: HashMap<String, String>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for BackendConfig {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

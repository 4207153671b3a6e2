use std::collections::BTreeMap;

use serde::Deserialize;

/// Connection settings for a cloud blob store (S3 or Azure).
///
/// The file is a flat TOML table, e.g.:
///
/// ```toml
/// accessKey = "AKIA..."
/// s3Bucket = "oak-blobs"
/// connectionTimeout = 30000
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct BlobStoreConfig {
    entries: BTreeMap<String, toml::Value>,
}

impl BlobStoreConfig {
    /// Value of `key` rendered as a string. Strings are returned without quotes.
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|value| match value {
            toml::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys whose values are tables or arrays rather than scalars.
    pub(crate) fn nested_keys(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, v)| matches!(v, toml::Value::Table(_) | toml::Value::Array(_)))
            .map(|(k, _)| k.as_str())
            .collect()
    }
}

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::BlobStoreConfig;

/// Errors that can occur when loading a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed for '{path}': {message}")]
    ValidationError { path: PathBuf, message: String },
}

impl BlobStoreConfig {
    /// Loads a blob store config file.
    ///
    /// - The file must exist and parse as TOML.
    /// - Returns an error if reading, parsing, or validation fails.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config = Self::parse(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate(path)?;
        tracing::debug!("Loaded {} blob store settings from {}", config.len(), path.display());
        Ok(config)
    }

    /// Parses config content without touching the filesystem.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - At least one setting is present
    /// - All settings are scalar values
    pub fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        if self.is_empty() {
            return Err(ConfigError::ValidationError {
                path: path.to_path_buf(),
                message: "At least one setting must be configured".to_string(),
            });
        }

        let nested = self.nested_keys();
        if !nested.is_empty() {
            return Err(ConfigError::ValidationError {
                path: path.to_path_buf(),
                message: format!("Settings must be plain values, found nested: {}", nested.join(", ")),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn load_reads_flat_table() {
        let file = write_config(
            r#"
accessKey = "AKIA123"
s3Bucket = "oak-blobs"
connectionTimeout = 30000
"#,
        );
        let config = BlobStoreConfig::load(file.path()).unwrap();
        assert_eq!(config.len(), 3);
        assert_eq!(config.get("accessKey").as_deref(), Some("AKIA123"));
        assert_eq!(config.get("connectionTimeout").as_deref(), Some("30000"));
        assert!(config.contains_key("s3Bucket"));
        assert_eq!(
            config.keys().collect::<Vec<_>>(),
            vec!["accessKey", "connectionTimeout", "s3Bucket"]
        );
    }

    #[test]
    fn load_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = BlobStoreConfig::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }

    #[test]
    fn load_invalid_toml_is_parse_error() {
        let file = write_config("accessKey = ");
        let err = BlobStoreConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn validation_fails_for_empty_file() {
        let file = write_config("");
        let err = BlobStoreConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
    }

    #[test]
    fn validation_fails_for_nested_tables() {
        let file = write_config("[proxy]\nhost = \"localhost\"\n");
        let err = BlobStoreConfig::load(file.path()).unwrap_err();
        match err {
            ConfigError::ValidationError { message, .. } => assert!(message.contains("proxy")),
            other => panic!("expected ValidationError, got {:?}", other),
        }
    }
}

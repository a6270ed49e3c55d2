use std::path::Path;

use serde::{Deserialize, Serialize};

/// Configuration for a [`Tree`](crate::Tree).
///
/// Settings are persisted as TOML. The format is versioned so that the
/// domain type can change without breaking existing files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Versions", into = "Versions")]
pub struct Config {
    /// The delimiter used by [`NodeView::path`](crate::NodeView::path).
    ///
    /// Never empty.
    delimiter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
        }
    }
}

/// Errors that can occur when building, loading or saving a [`Config`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file: {0}")]
    Read(#[source] std::io::Error),
    /// The configuration file is not valid TOML, or holds invalid settings.
    #[error("failed to parse config file: {0}")]
    Parse(#[source] toml::de::Error),
    /// The configuration could not be serialized.
    #[error("failed to serialize config: {0}")]
    Serialize(#[source] toml::ser::Error),
    /// The configuration file could not be written.
    #[error("failed to write config file: {0}")]
    Write(#[source] std::io::Error),
    /// The path delimiter was empty.
    #[error("path delimiter must not be empty")]
    EmptyDelimiter,
}

impl Config {
    /// Creates a configuration with the given path delimiter.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyDelimiter`] if `delimiter` is empty.
    pub fn with_delimiter(delimiter: impl Into<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.set_delimiter(delimiter)?;
        Ok(config)
    }

    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Read)?;
        toml::from_str(&content).map_err(ConfigError::Parse)
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        std::fs::write(path, content).map_err(ConfigError::Write)
    }

    /// Returns the path delimiter.
    #[must_use]
    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// Sets the path delimiter.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyDelimiter`] if `delimiter` is empty; the
    /// configuration is left unchanged.
    pub fn set_delimiter(&mut self, delimiter: impl Into<String>) -> Result<(), ConfigError> {
        let delimiter = delimiter.into();
        if delimiter.is_empty() {
            return Err(ConfigError::EmptyDelimiter);
        }
        self.delimiter = delimiter;
        Ok(())
    }
}

fn default_delimiter() -> String {
    "/".to_string()
}

/// The serialized versions of the configuration.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_delimiter")]
        delimiter: String,
    },
}

impl TryFrom<Versions> for Config {
    type Error = ConfigError;

    fn try_from(versions: Versions) -> Result<Self, Self::Error> {
        match versions {
            Versions::V1 { delimiter } => Self::with_delimiter(delimiter),
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            delimiter: config.delimiter,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn load_reads_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\ndelimiter = \"::\"\n")
            .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.delimiter(), "::");
    }

    #[test]
    fn load_missing_file_returns_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.toml");

        let error = Config::load(&missing).unwrap_err();
        assert!(matches!(error, ConfigError::Read(_)));
        assert!(error.to_string().starts_with("failed to read config file:"));
    }

    #[test]
    fn load_invalid_toml_returns_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\ndelimiter = 3\n").unwrap();

        let error = Config::load(file.path()).unwrap_err();
        assert!(matches!(error, ConfigError::Parse(_)));
    }

    #[test]
    fn load_rejects_empty_delimiter() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\ndelimiter = \"\"\n").unwrap();

        let error = Config::load(file.path()).unwrap_err();
        assert!(error.to_string().contains("path delimiter must not be empty"));
    }

    #[test]
    fn save_then_load_preserves_settings() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("dirtree.toml");

        let config = Config::with_delimiter(".").unwrap();
        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn empty_file_returns_default() {
        let expected = Config::default();
        let actual: Config = toml::from_str(r#"_version = "1""#).unwrap();
        assert_eq!(actual, expected);
        assert_eq!(actual.delimiter(), "/");
    }

    #[test]
    fn set_delimiter_rejects_empty() {
        let mut config = Config::default();
        assert!(matches!(
            config.set_delimiter(""),
            Err(ConfigError::EmptyDelimiter)
        ));
        assert_eq!(config.delimiter(), "/");
    }
}

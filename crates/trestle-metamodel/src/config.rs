//! Metamodel configuration

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file '{path}': {source}")]
    Io {
        /// The file that failed.
        path: String,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file was not valid TOML.
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// How strictly the metamodel treats advisory defects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strictness {
    /// Advisory defects (e.g. layout slots referencing unknown members)
    /// are logged but not reported as validation failures.
    #[default]
    Lenient,
    /// Advisory defects join the validation report.
    Strict,
}

/// Configuration of one metamodel instance.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MetaModelConfig {
    /// Directory holding layout and column-order files.
    pub resources_root: PathBuf,
    /// Cache resource probe results (including misses) once and for all.
    pub production_mode: bool,
    /// How strictly advisory defects are treated.
    pub strictness: Strictness,
}

impl Default for MetaModelConfig {
    fn default() -> Self {
        Self {
            resources_root: PathBuf::from("."),
            production_mode: false,
            strictness: Strictness::default(),
        }
    }
}

impl MetaModelConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Whether advisory defects should join the validation report.
    pub fn is_strict(&self) -> bool {
        self.strictness == Strictness::Strict
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MetaModelConfig::default();
        assert_eq!(config.resources_root, PathBuf::from("."));
        assert!(!config.production_mode);
        assert!(!config.is_strict());
    }

    #[test]
    fn test_from_toml() {
        let config = MetaModelConfig::from_toml_str(
            r#"
            resources_root = "config/layouts"
            production_mode = true
            strictness = "strict"
            "#,
        )
        .unwrap();
        assert_eq!(config.resources_root, PathBuf::from("config/layouts"));
        assert!(config.production_mode);
        assert!(config.is_strict());
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config = MetaModelConfig::from_toml_str("production_mode = true").unwrap();
        assert!(config.production_mode);
        assert_eq!(config.strictness, Strictness::Lenient);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(MetaModelConfig::from_toml_str("strictness = \"bogus\"").is_err());
    }
}

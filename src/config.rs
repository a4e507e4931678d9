//! Engine configuration
//!
//! Loads rendering options from a YAML file. Every field has a default, so
//! a missing file is not an error.

use std::path::{Path, PathBuf};

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ConfigError;

/// Rendering options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// chrono format for dates (`[CURRENT_DATE]`, date fields, PG dates)
    pub date_format: String,
    /// chrono format for `[CURRENT_TIME]`
    pub time_format: String,
    /// Insert a page break between consecutive firms when expanding
    pub page_break_between_firms: bool,
    /// Where last-entered placeholder values are remembered
    pub value_store_path: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            date_format: "%d-%m-%Y".to_string(),
            time_format: "%I:%M %p".to_string(),
            page_break_between_firms: true,
            value_store_path: None,
        }
    }
}

impl EngineConfig {
    /// Reject date and time formats chrono cannot render
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_format("date_format", &self.date_format)?;
        check_format("time_format", &self.time_format)
    }
}

fn check_format(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if StrftimeItems::new(value).any(|item| matches!(item, Item::Error)) {
        return Err(ConfigError::InvalidFormat {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

pub struct ConfigLoader {
    config_path: PathBuf,
}

impl ConfigLoader {
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    /// Create loader from DOCGEN_CONFIG env var or default to "docgen.yaml"
    pub fn from_env() -> Self {
        let path = std::env::var("DOCGEN_CONFIG").unwrap_or_else(|_| "docgen.yaml".to_string());
        Self::new(path)
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Load the configuration, falling back to defaults when the file is absent
    pub fn load(&self) -> Result<EngineConfig, ConfigError> {
        if !self.config_path.exists() {
            info!(
                "No config at {}, using defaults",
                self.config_path.display()
            );
            return Ok(EngineConfig::default());
        }

        let content =
            std::fs::read_to_string(&self.config_path).map_err(|source| ConfigError::Read {
                path: self.config_path.clone(),
                source,
            })?;

        let config: EngineConfig =
            serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: self.config_path.clone(),
                source,
            })?;
        config.validate()?;

        info!("Loaded engine configuration from {}", self.config_path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let loader = ConfigLoader::new("/definitely/not/here/docgen.yaml");
        let config = loader.load().unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docgen.yaml");
        std::fs::write(&path, "date_format: \"%d/%m/%Y\"\npage_break_between_firms: false\n").unwrap();

        let config = ConfigLoader::new(&path).load().unwrap();
        assert_eq!(config.date_format, "%d/%m/%Y");
        assert!(!config.page_break_between_firms);
        assert_eq!(config.time_format, "%I:%M %p");
    }

    #[test]
    fn test_bad_date_format_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docgen.yaml");
        std::fs::write(&path, "date_format: \"%Q\"\n").unwrap();

        let err = ConfigLoader::new(&path).load().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidFormat { field: "date_format", ref value } if value == "%Q"
        ));
    }

    #[test]
    fn test_bad_time_format_is_rejected() {
        let config = EngineConfig {
            time_format: "%I:%Q %p".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate().unwrap_err(),
            ConfigError::InvalidFormat { field: "time_format", .. }
        ));
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_unparsable_yaml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docgen.yaml");
        std::fs::write(&path, "date_format: [unterminated").unwrap();

        let err = ConfigLoader::new(&path).load().unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}

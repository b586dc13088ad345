//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading export
//! settings from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{ExportSettings, PayCodes};

/// File name of the settings document inside a configuration directory.
pub const SETTINGS_FILE: &str = "export.yaml";

/// Loads and provides access to export configuration.
///
/// # Directory Structure
///
/// ```text
/// config/
/// └── export.yaml   # Pay codes, post-to-payroll flag, date label
/// ```
///
/// # Example
///
/// ```no_run
/// use timesheet_export::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config").unwrap();
/// println!("Regular pay code: {}", loader.pay_codes().regular);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    settings: ExportSettings,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if `export.yaml` is
    /// missing (`ConfigNotFound`) or is not valid YAML (`ConfigParseError`).
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let settings_path = path.as_ref().join(SETTINGS_FILE);
        let settings = Self::load_yaml::<ExportSettings>(&settings_path)?;
        Ok(Self { settings })
    }

    /// Wraps already-built settings.
    pub fn from_settings(settings: ExportSettings) -> Self {
        Self { settings }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded settings.
    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    /// Returns the configured pay codes.
    pub fn pay_codes(&self) -> &PayCodes {
        &self.settings.pay_codes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_path() -> &'static str {
        "./config"
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.pay_codes().regular, "211");
        assert_eq!(loader.pay_codes().overtime, "212");
        assert_eq!(loader.pay_codes().subsistence, "261");
        assert_eq!(loader.settings().post_to_payroll, "Y");
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("export.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_load_invalid_yaml_returns_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(SETTINGS_FILE), "pay_codes: [unclosed").unwrap();

        match ConfigLoader::load(dir.path()) {
            Err(EngineError::ConfigParseError { path, .. }) => {
                assert!(path.contains("export.yaml"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_from_settings_keeps_values() {
        let mut settings = ExportSettings::default();
        settings.post_to_payroll = "N".to_string();
        let loader = ConfigLoader::from_settings(settings);
        assert_eq!(loader.settings().post_to_payroll, "N");
    }
}

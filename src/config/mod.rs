//! Configuration management
//!
//! This module handles loading and managing configuration from
//! TOML files and CLI arguments. Analysis thresholds are fixed and
//! deliberately not configurable; only presentation glue lives here.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::constants::output_formats;
use crate::core::error::{LapstatError, Result};

/// Name of the configuration file looked up in standard locations
pub const CONFIG_FILE_NAME: &str = ".lapstat.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Output format (json, pretty)
    pub output_format: Option<String>,

    /// Enable verbose logging
    pub verbose: Option<bool>,

    /// Driver charted by `plot` when none is given on the command line
    pub default_driver: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_format: Some(output_formats::DEFAULT.to_string()),
            verbose: Some(false),
            default_driver: None,
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            LapstatError::Config(format!(
                "Could not read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content)?;

        config.validate()?;
        Ok(config)
    }

    /// Try to find and load a config file in standard locations
    pub fn load_from_standard_locations() -> Self {
        if let Ok(config) = Self::load_from_file(CONFIG_FILE_NAME) {
            return config;
        }

        // Parent directories, up to 3 levels
        for i in 1..=3 {
            let path = format!("{}{CONFIG_FILE_NAME}", "../".repeat(i));
            if let Ok(config) = Self::load_from_file(&path) {
                return config;
            }
        }

        Self::default()
    }

    /// Merge this config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli_config: &CliConfig) {
        if let Some(ref output_format) = cli_config.output_format {
            self.output_format = Some(output_format.clone());
        }
        if cli_config.verbose {
            self.verbose = Some(true);
        }
        if let Some(ref driver) = cli_config.driver {
            self.default_driver = Some(driver.clone());
        }
    }

    /// Whether results should be pretty-printed
    pub fn is_pretty(&self) -> bool {
        self.output_format.as_deref() == Some(output_formats::PRETTY)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if let Some(ref format) = self.output_format
            && !output_formats::ALL.contains(&format.as_str())
        {
            return Err(LapstatError::Config(format!(
                "Invalid output format '{format}'. Expected one of: {}.",
                output_formats::ALL.join(", ")
            )));
        }

        if let Some(ref driver) = self.default_driver
            && driver.trim().is_empty()
        {
            return Err(LapstatError::Config(
                "Default driver cannot be empty.".to_string(),
            ));
        }

        Ok(())
    }
}

/// Configuration options that can come from CLI
#[derive(Debug, Default)]
pub struct CliConfig {
    pub output_format: Option<String>, // --format
    pub verbose: bool,                 // --verbose
    pub quiet: bool,                   // --quiet
    pub driver: Option<String>,        // plot --driver

    pub config_file: Option<String>, // --config
    pub no_config: bool,             // --no-config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(
            config.output_format,
            Some(output_formats::DEFAULT.to_string())
        );
        assert_eq!(config.verbose, Some(false));
        assert!(config.default_driver.is_none());
        assert!(!config.is_pretty());
    }

    #[test]
    fn test_config_load_from_file() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(b"output_format = \"pretty\"\nverbose = true\ndefault_driver = \"NOR\"")?;

        let config = Config::load_from_file(file.path())?;
        assert!(config.is_pretty());
        assert_eq!(config.verbose, Some(true));
        assert_eq!(config.default_driver.as_deref(), Some("NOR"));

        Ok(())
    }

    #[test]
    fn test_config_load_invalid_toml() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(b"output_format = [")?;

        let err = Config::load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, LapstatError::TomlParsing(_)));
        assert!(format!("{err}").contains("TOML parsing error"));
        Ok(())
    }

    #[test]
    fn test_config_load_missing_file() {
        let err = Config::load_from_file("no/such/.lapstat.toml").unwrap_err();
        assert!(matches!(err, LapstatError::Config(_)));
    }

    #[test]
    fn test_config_rejects_unknown_format() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(b"output_format = \"xml\"")?;

        let err = Config::load_from_file(file.path()).unwrap_err();
        assert!(format!("{err}").contains("Invalid output format 'xml'"));
        Ok(())
    }

    #[test]
    fn test_config_rejects_blank_driver() {
        let config = Config {
            default_driver: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_merge_with_cli() {
        let mut config = Config::default();
        let cli_config = CliConfig {
            output_format: Some("pretty".to_string()),
            verbose: true,
            driver: Some("PIA".to_string()),
            ..Default::default()
        };

        config.merge_with_cli(&cli_config);

        assert!(config.is_pretty());
        assert_eq!(config.verbose, Some(true));
        assert_eq!(config.default_driver.as_deref(), Some("PIA"));
    }

    #[test]
    fn test_config_merge_keeps_file_values_when_cli_silent() {
        let mut config = Config {
            output_format: Some("pretty".to_string()),
            default_driver: Some("HAM".to_string()),
            ..Default::default()
        };
        config.merge_with_cli(&CliConfig::default());

        assert!(config.is_pretty());
        assert_eq!(config.default_driver.as_deref(), Some("HAM"));
    }
}

//! Configuration file handling for mapon-cli

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use mapon_client::{DEFAULT_BASE_URL, DEFAULT_RETRY_COUNT, DEFAULT_TIMEOUT};
use serde::{Deserialize, Serialize};

use crate::output::OutputFormat;

/// Directory under the user config dir holding config and credentials
pub const APP_DIR: &str = "mapon-cli";

/// Configuration for the CLI tool
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Default API base URL
    pub base_url: Option<String>,
    /// Default output format
    pub output: Option<OutputFormat>,
    /// Disable colored output
    pub no_color: Option<bool>,
    /// Request timeout in seconds
    pub timeout_secs: Option<u64>,
    /// Retries after a failed attempt
    pub retries: Option<u32>,
}

impl Config {
    /// Load configuration from the default config file
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Get the default config file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join(APP_DIR);

        Ok(config_dir.join("config.toml"))
    }

    /// Merge CLI arguments over config file values
    pub fn merge_with_args(&self, args: &ArgOverrides) -> MergedConfig {
        MergedConfig {
            base_url: args
                .base_url
                .clone()
                .or_else(|| self.base_url.clone())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            output: args.output.or(self.output).unwrap_or_default(),
            no_color: args.no_color || self.no_color.unwrap_or(false),
            timeout: args
                .timeout_secs
                .or(self.timeout_secs)
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_TIMEOUT),
            retries: args.retries.or(self.retries).unwrap_or(DEFAULT_RETRY_COUNT),
        }
    }
}

/// Values given on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct ArgOverrides {
    pub base_url: Option<String>,
    pub output: Option<OutputFormat>,
    pub no_color: bool,
    pub timeout_secs: Option<u64>,
    pub retries: Option<u32>,
}

/// Fully resolved configuration after merging CLI args
#[derive(Debug, Clone)]
pub struct MergedConfig {
    pub base_url: String,
    pub output: OutputFormat,
    pub no_color: bool,
    pub timeout: Duration,
    pub retries: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "base_url = \"http://localhost:9000\"\noutput = \"table\"\ntimeout_secs = 5"
        )
        .unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:9000"));
        assert_eq!(config.output, Some(OutputFormat::Table));
        assert_eq!(config.timeout_secs, Some(5));
        assert_eq!(config.retries, None);
    }

    #[test]
    fn test_load_from_rejects_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "output = [").unwrap();
        let err = Config::load_from(file.path()).unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse config file"));
    }

    #[test]
    fn test_args_override_file() {
        let config = Config {
            base_url: Some("http://file".to_string()),
            output: Some(OutputFormat::Csv),
            no_color: Some(true),
            timeout_secs: Some(5),
            retries: Some(1),
        };
        let args = ArgOverrides {
            base_url: Some("http://flag".to_string()),
            retries: Some(0),
            ..Default::default()
        };

        let merged = config.merge_with_args(&args);
        assert_eq!(merged.base_url, "http://flag");
        assert_eq!(merged.output, OutputFormat::Csv);
        assert!(merged.no_color);
        assert_eq!(merged.timeout, Duration::from_secs(5));
        assert_eq!(merged.retries, 0);
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let merged = Config::default().merge_with_args(&ArgOverrides::default());
        assert_eq!(merged.base_url, DEFAULT_BASE_URL);
        assert_eq!(merged.output, OutputFormat::Json);
        assert!(!merged.no_color);
        assert_eq!(merged.timeout, DEFAULT_TIMEOUT);
        assert_eq!(merged.retries, DEFAULT_RETRY_COUNT);
    }
}

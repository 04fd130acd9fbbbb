//! Configuration management for AddonHub
//!
//! This module provides a layered configuration system that loads settings from:
//! 1. Default values (embedded in structs)
//! 2. TOML configuration file
//! 3. Environment variables (highest priority)
//!
//! # Usage
//!
//! ```no_run
//! use addonhub::config::Config;
//!
//! let config = Config::load().expect("Failed to load configuration");
//! println!("Server listening on: {}", config.server.bind_addr);
//! ```
//!
//! # Environment Variables
//!
//! Configuration can be overridden using environment variables with the pattern:
//! `ADDONHUB__<section>__<key>`
//!
//! Examples:
//! - `ADDONHUB__SERVER__BIND_ADDR=0.0.0.0:9000`
//! - `ADDONHUB__UPSTREAM__REQUEST_TIMEOUT_SECS=10`
//!
//! # Configuration File
//!
//! By default, the configuration is loaded from `config/addonhub.toml`.
//! This can be overridden using the `ADDONHUB_CONFIG` environment variable.

mod models;
mod sources;
mod validation;

pub use models::{Config, ConfigSource, ServerConfig, UpstreamConfig};
pub use validation::ValidationError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ValidationError),
}

impl Config {
    /// Load configuration from all sources (file + environment)
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables (`ADDONHUB__*`)
    /// 2. TOML file (default: `config/addonhub.toml`)
    /// 3. Default values
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file is malformed or
    /// validation fails.
    pub fn load() -> Result<Self, ConfigError> {
        let config = sources::load()?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific path
    ///
    /// Useful for testing with custom configuration files.
    pub fn load_from_path(path: std::path::PathBuf) -> Result<Self, ConfigError> {
        let config = sources::load_from_sources(path)?;
        validation::validate(&config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_minimal_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let toml_content = r#"
[configs.demo]
upstreams = ["http://a.example/manifest.json"]
        "#;

        fs::write(&config_path, toml_content).unwrap();

        let config = Config::load_from_path(config_path).unwrap();
        assert_eq!(config.configs.len(), 1);
        assert_eq!(config.server.bind_addr.to_string(), "0.0.0.0:7700");
    }

    #[test]
    fn test_validation_catches_zero_timeout() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let toml_content = r#"
[upstream]
request_timeout_secs = 0
        "#;

        fs::write(&config_path, toml_content).unwrap();

        let result = Config::load_from_path(config_path);
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::ValidationError(ValidationError::InvalidTimeout { .. })
        ));
    }

    #[test]
    fn test_full_config_example() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let toml_content = r#"
[server]
bind_addr = "0.0.0.0:7700"

[upstream]
connect_timeout_secs = 5
request_timeout_secs = 20
user_agent = "AddonHub/0.1.0"

[configs.demo]
upstreams = [
    "http://movies.example/manifest.json",
    "http://series.example",
]

[configs.kids]
upstreams = ["http://kids.example/addon/manifest.json"]
        "#;

        fs::write(&config_path, toml_content).unwrap();

        let config = Config::load_from_path(config_path).unwrap();

        assert_eq!(config.server.bind_addr.to_string(), "0.0.0.0:7700");
        assert_eq!(config.upstream.connect_timeout_secs, 5);
        assert_eq!(config.configs.len(), 2);
        assert_eq!(config.configs["demo"].upstreams.len(), 2);
        assert_eq!(
            config.configs["kids"].upstreams,
            vec!["http://kids.example/addon/manifest.json"]
        );
    }
}

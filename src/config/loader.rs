use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;
use crate::domain::LateCutoff;

/// Errors that can occur when loading configuration.
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

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/rollcall/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("rollcall").join("config.toml")
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - If the file exists, parses it as TOML and validates.
    /// - Returns an error if reading, parsing, or validation fails.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - Departments and sections are non-empty
    /// - The warning fires strictly before expiry
    /// - The late cutoff parses as HH:MM
    /// - Directory codes are unique
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.catalog.departments.is_empty() {
            return Err(ConfigError::ValidationError {
                message: "At least one department must be configured".to_string(),
            });
        }

        if self.catalog.sections.is_empty() {
            return Err(ConfigError::ValidationError {
                message: "At least one section must be configured".to_string(),
            });
        }

        if self.session.warning_after_seconds >= self.session.expire_after_seconds {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "session.warning_after_seconds ({}) must be less than session.expire_after_seconds ({})",
                    self.session.warning_after_seconds, self.session.expire_after_seconds
                ),
            });
        }

        self.late_cutoff()?;

        for (i, record) in self.directory.iter().enumerate() {
            if self.directory[..i].iter().any(|r| r.sr_code == record.sr_code) {
                return Err(ConfigError::ValidationError {
                    message: format!("Duplicate directory code '{}'", record.sr_code),
                });
            }
        }

        Ok(())
    }

    /// The parsed late cutoff.
    pub fn late_cutoff(&self) -> Result<LateCutoff, ConfigError> {
        LateCutoff::parse(&self.check_in.late_after).map_err(|e| ConfigError::ValidationError {
            message: e.to_string(),
        })
    }
}

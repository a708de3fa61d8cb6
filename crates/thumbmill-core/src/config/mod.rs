//! Configuration management for thumbmill.
//!
//! Configuration is loaded from a platform config directory with sensible
//! defaults. All section structs implement `Default` and `#[serde(default)]`,
//! so a partial config file only overrides what it names.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for thumbmill.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Upload and output directories
    pub storage: StorageConfig,

    /// Quality, width list, supported formats
    pub processing: ProcessingConfig,

    /// Intake-side limits
    pub limits: LimitsConfig,

    /// Output file retention
    pub retention: RetentionConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns validated default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories:
    /// - macOS: ~/Library/Application Support/dev.thumbmill.thumbmill/config.toml
    /// - Linux: ~/.config/thumbmill/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\thumbmill\config\config.toml
    ///
    /// Falls back to ~/.thumbmill/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "thumbmill", "thumbmill")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".thumbmill").join("config.toml")
            })
    }

    /// Get the resolved upload directory path (with ~ expansion).
    pub fn upload_dir(&self) -> PathBuf {
        expand(&self.storage.upload_dir)
    }

    /// Get the resolved output directory path (with ~ expansion).
    pub fn output_dir(&self) -> PathBuf {
        expand(&self.storage.output_dir)
    }

    /// Retention window as a duration.
    pub fn retention_window(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.retention.max_age_hours * 3600)
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}

fn expand(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.processing.default_quality, 85);
        assert_eq!(config.retention.max_age_hours, 24);
        assert_eq!(config.processing.widths.first(), Some(&300));
        assert_eq!(config.processing.widths.last(), Some(&2560));
    }

    #[test]
    fn test_config_to_toml() {
        let config = Config::default();
        let toml = config.to_toml().unwrap();
        assert!(toml.contains("[storage]"));
        assert!(toml.contains("[processing]"));
        assert!(toml.contains("[retention]"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[processing]\ndefault_quality = 70\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.processing.default_quality, 70);
        // Untouched sections keep their defaults
        assert_eq!(config.retention.max_age_hours, 24);
        assert_eq!(config.processing.widths.len(), 8);
    }

    #[test]
    fn test_load_from_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[processing]\ndefault_quality = 0\n").unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_tilde_expansion() {
        let mut config = Config::default();
        config.storage.output_dir = "~/thumbs".to_string();
        let expanded = config.output_dir();
        assert!(!expanded.to_string_lossy().contains('~'));
    }
}

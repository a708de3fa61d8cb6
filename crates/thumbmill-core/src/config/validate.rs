//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.processing.default_quality == 0 || self.processing.default_quality > 100 {
            return Err(ConfigError::ValidationError(
                "processing.default_quality must be between 1 and 100".into(),
            ));
        }
        if self.processing.widths.is_empty() {
            return Err(ConfigError::ValidationError(
                "processing.widths must not be empty".into(),
            ));
        }
        if self.processing.widths.iter().any(|w| *w == 0) {
            return Err(ConfigError::ValidationError(
                "processing.widths entries must be > 0".into(),
            ));
        }
        if self.processing.supported_formats.is_empty() {
            return Err(ConfigError::ValidationError(
                "processing.supported_formats must not be empty".into(),
            ));
        }
        if self.limits.max_file_size_mb == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_file_size_mb must be > 0".into(),
            ));
        }
        if self.retention.max_age_hours == 0 {
            return Err(ConfigError::ValidationError(
                "retention.max_age_hours must be > 0".into(),
            ));
        }
        if self.storage.output_dir.is_empty() {
            return Err(ConfigError::ValidationError(
                "storage.output_dir must not be empty".into(),
            ));
        }
        Ok(())
    }
}

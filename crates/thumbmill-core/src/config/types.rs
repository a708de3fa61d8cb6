//! Configuration section structs with defaults.

use serde::{Deserialize, Serialize};

/// Working directories for uploads and generated thumbnails.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Where uploaded source images land (created on driver construction)
    pub upload_dir: String,

    /// Where generated thumbnails are written
    pub output_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: "uploads".to_string(),
            output_dir: "output".to_string(),
        }
    }
}

/// Processing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Default encode quality (1-100) when the caller supplies none
    pub default_quality: u8,

    /// Default thumbnail widths, in order — standard responsive breakpoints
    pub widths: Vec<u32>,

    /// Supported input extensions
    pub supported_formats: Vec<String>,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            default_quality: 85,
            widths: vec![300, 400, 600, 768, 1024, 1200, 1920, 2560],
            supported_formats: crate::pipeline::format::SUPPORTED_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}

/// Intake-side limits.
///
/// Enforced at the boundary that accepts files (the CLI `process` command),
/// not inside the batch driver — an oversized file is rejected before the
/// pipeline ever sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum source file size in megabytes
    pub max_file_size_mb: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: 1000,
        }
    }
}

/// Output file retention.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetentionConfig {
    /// Delete output files older than this many hours
    pub max_age_hours: u64,
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self { max_age_hours: 24 }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

//! Error types for the thumbmill pipeline.
//!
//! Errors are organized by stage so callers can tell a misconfigured setup
//! apart from a per-image failure. Every pipeline error carries the path it
//! relates to; nothing here is fatal to the host process — the batch driver
//! catches per-width failures and reports them in the batch outcome.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for thumbmill operations.
#[derive(Error, Debug)]
pub enum ThumbmillError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Pipeline processing errors
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Pipeline processing errors, organized by stage.
///
/// Declining to upscale is deliberately *not* in this enum: it is a policy
/// outcome, not a failure, and is modelled as
/// [`ResizeOutcome::Skipped`](crate::types::ResizeOutcome).
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Source file does not exist or is not a regular file
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Source extension is not in the supported set
    #[error("Unsupported format for {path}: {format}")]
    UnsupportedFormat { path: PathBuf, format: String },

    /// Destination extension has no encoder
    #[error("Unsupported destination format for {path}: {format}")]
    UnsupportedDestination { path: PathBuf, format: String },

    /// Dimensions could not be determined from the file header
    #[error("Cannot read image header of {path}: {message}")]
    FormatUnreadable { path: PathBuf, message: String },

    /// Full decode failed despite a readable header
    #[error("Decode error for {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// Encoding the resampled canvas failed
    #[error("Encode error for {path}: {message}")]
    Encode { path: PathBuf, message: String },

    /// Writing the encoded bytes to disk failed
    #[error("Write error for {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory scan failed (retention sweep)
    #[error("Cannot scan directory {path}: {message}")]
    Scan { path: PathBuf, message: String },
}

/// Convenience type alias for thumbmill results.
pub type Result<T> = std::result::Result<T, ThumbmillError>;

/// Convenience type alias for pipeline-specific results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;

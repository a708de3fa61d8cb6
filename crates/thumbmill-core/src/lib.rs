//! thumbmill-core - Embeddable thumbnail generation library.
//!
//! thumbmill takes an uploaded raster image and produces a fixed set of
//! resized, re-encoded variants at standard responsive widths, preserving
//! aspect ratio and never upscaling. Output files are retained by age only:
//! a periodic sweep deletes anything older than the configured window.
//!
//! # Architecture
//!
//! The pipeline is a straight-line composition with no shared state between
//! invocations:
//!
//! ```text
//! Source → Inspect → Upscale guard → Decode → Resample (Lanczos3) → Encode → Disk
//! ```
//!
//! driven once per requested width by the [`BatchDriver`], which aggregates
//! per-width outcomes into a [`BatchOutcome`]. Everything is synchronous and
//! blocking; concurrent batches for different source images are safe because
//! each call touches only its own paths.
//!
//! # Usage
//!
//! ```rust,ignore
//! use thumbmill_core::{BatchDriver, Config, Quality};
//!
//! fn main() -> thumbmill_core::Result<()> {
//!     let config = Config::load()?;
//!     let driver = BatchDriver::new(&config)?;
//!
//!     let outcome = driver.process("./upload.jpg".as_ref(), &[300, 600], Quality::new(85));
//!     println!("{}", serde_json::to_string(&outcome.report())?);
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod types;

// Re-exports for convenient access
pub use config::Config;
pub use error::{ConfigError, PipelineError, PipelineResult, Result, ThumbmillError};
pub use output::{OutputFormat, OutputWriter};
pub use pipeline::{parse_width_list, sweep, BatchDriver, ImageKind, MIN_WIDTH};
pub use types::{
    BatchOutcome, BatchReport, ProducedInfo, Quality, ResizeOutcome, SweepStats, ThumbnailEntry,
    WidthOutcome,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

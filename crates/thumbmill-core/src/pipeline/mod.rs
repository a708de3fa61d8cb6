//! The thumbnail pipeline.
//!
//! - **format**: the closed set of supported raster formats
//! - **inspect**: header-only dimension/format probing
//! - **resize**: decode, Lanczos3 resample, re-encode, write
//! - **batch**: drive the resizer across a width list
//! - **sweep**: age-based retention over the output directory

pub mod batch;
pub mod format;
pub mod inspect;
pub mod resize;
pub mod sweep;

// Re-exports for convenient access
pub use batch::{parse_width_list, BatchDriver, MIN_WIDTH};
pub use format::{ImageKind, SUPPORTED_EXTENSIONS};
pub use inspect::{inspect, ImageInfo};
pub use resize::{png_compression_level, resize, scaled_height};
pub use sweep::{sweep, sweep_with_cutoff};

//! Core data types for the thumbmill pipeline.
//!
//! These types describe the outcome of processing one uploaded image into a
//! set of resized variants. Internally, a declined upscale ([`WidthOutcome::Skipped`])
//! and a real failure ([`WidthOutcome::Failed`]) stay distinct; only the wire
//! report ([`BatchReport`]) collapses both into its `errors` list, matching
//! the JSON shape existing clients consume.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Quality setting for lossy encoding, clamped to 1-100 on construction.
///
/// Threaded explicitly through every call rather than stored on the driver,
/// so two batches can never observe each other's quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quality(u8);

impl Quality {
    pub fn new(value: i64) -> Self {
        Self(value.clamp(1, 100) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(85)
    }
}

/// What the resizer produced for one target width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProducedInfo {
    /// Output width in pixels (equals the requested target width)
    pub width: u32,

    /// Output height in pixels, derived from the source aspect ratio
    pub height: u32,

    /// Encoded output size in bytes
    pub byte_size: u64,
}

/// Result of a single resize call.
///
/// `Skipped` is the upscale guard firing: the target width exceeds the source
/// width, so no file is written and no error is raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeOutcome {
    Produced(ProducedInfo),
    Skipped {
        target_width: u32,
        source_width: u32,
    },
}

/// One produced thumbnail as it appears in the wire report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ThumbnailEntry {
    /// Target width in pixels
    pub size: u32,

    /// Output file name (`<stem>-<width>w.<ext>`)
    pub filename: String,

    /// Full path to the output file
    pub path: PathBuf,

    /// Output file size in bytes
    pub file_size: u64,
}

/// Per-width outcome inside a batch, in request order.
#[derive(Debug, Clone)]
pub enum WidthOutcome {
    /// Thumbnail written to disk
    Produced(ThumbnailEntry),

    /// Upscale guard: target width exceeds the source width
    Skipped { width: u32, source_width: u32 },

    /// Decode, encode, or write failed for this width
    Failed { width: u32, reason: String },
}

impl WidthOutcome {
    pub fn is_produced(&self) -> bool {
        matches!(self, WidthOutcome::Produced(_))
    }
}

/// Aggregate result of processing one source image through the batch driver.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    /// Path of the source image
    pub source: PathBuf,

    /// Source basename, as reported to clients
    pub file_name: String,

    /// Source file size in bytes (0 when the source was unreadable)
    pub original_size: u64,

    /// One entry per surviving requested width, in request order
    pub outcomes: Vec<WidthOutcome>,

    /// Top-level failure (missing file, unsupported extension). When set,
    /// `outcomes` is empty.
    pub batch_error: Option<String>,
}

impl BatchOutcome {
    /// True iff at least one width produced a thumbnail.
    pub fn success(&self) -> bool {
        self.outcomes.iter().any(WidthOutcome::is_produced)
    }

    /// Produced entries only, in request order.
    pub fn produced(&self) -> impl Iterator<Item = &ThumbnailEntry> {
        self.outcomes.iter().filter_map(|o| match o {
            WidthOutcome::Produced(entry) => Some(entry),
            _ => None,
        })
    }

    /// Flatten into the wire report consumed by clients.
    pub fn report(&self) -> BatchReport {
        let mut errors = Vec::new();
        if let Some(err) = &self.batch_error {
            errors.push(err.clone());
        }
        for outcome in &self.outcomes {
            match outcome {
                WidthOutcome::Produced(_) => {}
                WidthOutcome::Skipped {
                    width,
                    source_width,
                } => errors.push(format!(
                    "Skipped size {width}: exceeds source width {source_width}"
                )),
                WidthOutcome::Failed { width, reason } => errors.push(format!(
                    "Failed to generate thumbnail for size {width}: {reason}"
                )),
            }
        }

        BatchReport {
            success: self.success(),
            file: self.file_name.clone(),
            original_size: self.original_size,
            thumbnails: self.produced().cloned().collect(),
            errors,
        }
    }
}

/// The JSON object returned to clients for one processed image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub success: bool,
    pub file: String,
    pub original_size: u64,
    pub thumbnails: Vec<ThumbnailEntry>,
    pub errors: Vec<String>,
}

/// Statistics from one retention sweep pass.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SweepStats {
    /// Files deleted (older than the cutoff)
    pub removed: usize,

    /// Regular files retained (newer than the cutoff)
    pub retained: usize,

    /// Deletions that failed (logged, never fatal)
    pub failed: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_clamps_to_valid_range() {
        assert_eq!(Quality::new(0).value(), 1);
        assert_eq!(Quality::new(50).value(), 50);
        assert_eq!(Quality::new(999).value(), 100);
        assert_eq!(Quality::new(-3).value(), 1);
    }

    #[test]
    fn quality_default_is_85() {
        assert_eq!(Quality::default().value(), 85);
    }

    fn sample_outcome() -> BatchOutcome {
        BatchOutcome {
            source: PathBuf::from("/uploads/beach.jpg"),
            file_name: "beach.jpg".to_string(),
            original_size: 4096,
            outcomes: vec![
                WidthOutcome::Produced(ThumbnailEntry {
                    size: 300,
                    filename: "beach-300w.jpg".to_string(),
                    path: PathBuf::from("/output/beach-300w.jpg"),
                    file_size: 1024,
                }),
                WidthOutcome::Skipped {
                    width: 3000,
                    source_width: 2000,
                },
            ],
            batch_error: None,
        }
    }

    #[test]
    fn success_requires_at_least_one_produced() {
        let outcome = sample_outcome();
        assert!(outcome.success());

        let empty = BatchOutcome {
            outcomes: vec![],
            batch_error: Some("File not found".to_string()),
            ..outcome
        };
        assert!(!empty.success());
    }

    #[test]
    fn report_collapses_skips_into_errors() {
        let report = sample_outcome().report();
        assert!(report.success);
        assert_eq!(report.thumbnails.len(), 1);
        assert_eq!(report.thumbnails[0].size, 300);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("3000"));
    }

    #[test]
    fn report_wire_shape() {
        let json = serde_json::to_string(&sample_outcome().report()).unwrap();
        assert!(json.contains("\"success\":true"));
        assert!(json.contains("\"file\":\"beach.jpg\""));
        assert!(json.contains("\"original_size\":4096"));
        assert!(json.contains("\"filename\":\"beach-300w.jpg\""));
        assert!(json.contains("\"file_size\":1024"));
    }

    #[test]
    fn report_puts_batch_error_first() {
        let mut outcome = sample_outcome();
        outcome.outcomes.clear();
        outcome.batch_error = Some("File not found: /uploads/beach.jpg".to_string());
        let report = outcome.report();
        assert!(!report.success);
        assert!(report.thumbnails.is_empty());
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].starts_with("File not found"));
    }
}

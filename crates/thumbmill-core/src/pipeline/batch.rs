//! The batch driver: one source image, many widths, one aggregate outcome.
//!
//! Widths are processed strictly sequentially in request order. A skip or a
//! failure for one width never aborts the rest, and nothing the driver hits
//! is fatal to the caller — every problem lands in the [`BatchOutcome`].

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{PipelineError, Result};
use crate::types::{BatchOutcome, Quality, ResizeOutcome, ThumbnailEntry, WidthOutcome};

use super::format::extension_of;
use super::resize::resize;

/// Requested widths below this are silently dropped, not reported as errors.
pub const MIN_WIDTH: u32 = 100;

/// Drives the resizer across a width list for one source image.
pub struct BatchDriver {
    output_dir: PathBuf,
    default_widths: Vec<u32>,
    supported_formats: Vec<String>,
}

impl BatchDriver {
    /// Create a driver from config, creating the upload and output
    /// directories if they don't exist.
    pub fn new(config: &Config) -> Result<Self> {
        let upload_dir = config.upload_dir();
        let output_dir = config.output_dir();
        std::fs::create_dir_all(&upload_dir)?;
        std::fs::create_dir_all(&output_dir)?;

        Ok(Self {
            output_dir,
            default_widths: config.processing.widths.clone(),
            supported_formats: config
                .processing
                .supported_formats
                .iter()
                .map(|f| f.to_ascii_lowercase())
                .collect(),
        })
    }

    /// The configured default width list.
    pub fn default_widths(&self) -> &[u32] {
        &self.default_widths
    }

    /// Process one source image into thumbnails for the requested widths.
    ///
    /// An empty `requested` list means "use the configured defaults";
    /// otherwise the list is used verbatim in order, minus entries below
    /// [`MIN_WIDTH`].
    pub fn process(&self, source: &Path, requested: &[u32], quality: Quality) -> BatchOutcome {
        let file_name = source
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();

        let mut outcome = BatchOutcome {
            source: source.to_path_buf(),
            file_name,
            original_size: 0,
            outcomes: Vec::new(),
            batch_error: None,
        };

        if !source.is_file() {
            let err = PipelineError::FileNotFound(source.to_path_buf());
            tracing::warn!(source = %source.display(), "batch rejected: {err}");
            outcome.batch_error = Some(err.to_string());
            return outcome;
        }

        // Extension gate comes before any header inspection
        let ext = extension_of(source);
        if !self.supported_formats.contains(&ext) {
            let err = PipelineError::UnsupportedFormat {
                path: source.to_path_buf(),
                format: ext,
            };
            tracing::warn!(source = %source.display(), "batch rejected: {err}");
            outcome.batch_error = Some(err.to_string());
            return outcome;
        }

        outcome.original_size = std::fs::metadata(source).map(|m| m.len()).unwrap_or(0);

        let widths = self.effective_widths(requested);
        tracing::info!(
            source = %source.display(),
            widths = ?widths,
            quality = quality.value(),
            "processing batch"
        );

        for width in widths {
            let dest = self.destination_for(source, width);
            match resize(source, &dest, width, quality) {
                Ok(ResizeOutcome::Produced(info)) => {
                    outcome.outcomes.push(WidthOutcome::Produced(ThumbnailEntry {
                        size: width,
                        filename: dest
                            .file_name()
                            .and_then(|n| n.to_str())
                            .unwrap_or_default()
                            .to_string(),
                        path: dest,
                        file_size: info.byte_size,
                    }));
                }
                Ok(ResizeOutcome::Skipped {
                    target_width,
                    source_width,
                }) => {
                    outcome.outcomes.push(WidthOutcome::Skipped {
                        width: target_width,
                        source_width,
                    });
                }
                Err(e) => {
                    tracing::warn!(source = %outcome.file_name, width, "width failed: {e}");
                    outcome.outcomes.push(WidthOutcome::Failed {
                        width,
                        reason: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            source = %outcome.file_name,
            produced = outcome.produced().count(),
            total = outcome.outcomes.len(),
            success = outcome.success(),
            "batch finished"
        );
        outcome
    }

    /// `<stem>-<width>w.<source-extension>` inside the output directory.
    fn destination_for(&self, source: &Path, width: u32) -> PathBuf {
        let stem = source
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("image");
        let ext = source
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        self.output_dir.join(format!("{stem}-{width}w.{ext}"))
    }

    /// The caller's list verbatim minus sub-minimum entries, or the defaults
    /// when the caller supplied nothing.
    fn effective_widths(&self, requested: &[u32]) -> Vec<u32> {
        if requested.is_empty() {
            return self.default_widths.clone();
        }
        requested.iter().copied().filter(|w| *w >= MIN_WIDTH).collect()
    }
}

/// Parse a caller-supplied width list leniently.
///
/// Accepts either a JSON array (`[300, "400", null]`) or comma-separated
/// text (`300, 400`). Non-numeric entries are dropped silently, matching the
/// intake behavior of the service this feeds.
pub fn parse_width_list(raw: &str) -> Vec<u32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    if let Ok(serde_json::Value::Array(items)) = serde_json::from_str(trimmed) {
        return items
            .iter()
            .filter_map(|item| match item {
                serde_json::Value::Number(n) => n.as_u64().map(|v| v as u32),
                serde_json::Value::String(s) => s.trim().parse().ok(),
                _ => None,
            })
            .collect();
    }

    trimmed
        .split(',')
        .filter_map(|part| part.trim().parse().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::test_images::write_test_jpeg;

    fn driver_in(dir: &Path) -> BatchDriver {
        let mut config = Config::default();
        config.storage.upload_dir = dir.join("uploads").to_string_lossy().into_owned();
        config.storage.output_dir = dir.join("output").to_string_lossy().into_owned();
        BatchDriver::new(&config).unwrap()
    }

    #[test]
    fn new_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        driver_in(dir.path());
        assert!(dir.path().join("uploads").is_dir());
        assert!(dir.path().join("output").is_dir());
    }

    #[test]
    fn batch_mixes_produced_skipped_and_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let driver = driver_in(dir.path());

        let source = dir.path().join("uploads").join("wide.jpg");
        write_test_jpeg(&source, 2000, 1000);

        let outcome = driver.process(&source, &[300, 3000, 50], Quality::default());

        // 50 is below the minimum and vanishes entirely
        assert_eq!(outcome.outcomes.len(), 2);
        match &outcome.outcomes[0] {
            WidthOutcome::Produced(entry) => {
                assert_eq!(entry.size, 300);
                assert_eq!(entry.filename, "wide-300w.jpg");
                assert!(entry.path.exists());
                let (w, h) = image::image_dimensions(&entry.path).unwrap();
                assert_eq!((w, h), (300, 150));
            }
            other => panic!("expected Produced, got {other:?}"),
        }
        match &outcome.outcomes[1] {
            WidthOutcome::Skipped {
                width,
                source_width,
            } => {
                assert_eq!(*width, 3000);
                assert_eq!(*source_width, 2000);
            }
            other => panic!("expected Skipped, got {other:?}"),
        }
        assert!(outcome.success());
        assert!(outcome.original_size > 0);
    }

    #[test]
    fn missing_source_fails_the_whole_batch() {
        let dir = tempfile::tempdir().unwrap();
        let driver = driver_in(dir.path());

        let outcome = driver.process(
            dir.path().join("nope.jpg").as_path(),
            &[300],
            Quality::default(),
        );
        assert!(!outcome.success());
        assert!(outcome.outcomes.is_empty());
        assert!(outcome.batch_error.as_deref().unwrap().contains("File not found"));
        assert_eq!(outcome.original_size, 0);
    }

    #[test]
    fn unsupported_extension_rejected_before_inspection() {
        let dir = tempfile::tempdir().unwrap();
        let driver = driver_in(dir.path());

        // Not even a readable image — the extension gate fires first
        let source = dir.path().join("uploads").join("doc.bmp");
        std::fs::write(&source, b"BM not really").unwrap();

        let outcome = driver.process(&source, &[300], Quality::default());
        assert!(!outcome.success());
        assert!(outcome.outcomes.is_empty());
        assert!(outcome
            .batch_error
            .as_deref()
            .unwrap()
            .contains("Unsupported format"));
    }

    #[test]
    fn empty_request_uses_configured_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let driver = driver_in(dir.path());

        let source = dir.path().join("uploads").join("small.jpg");
        write_test_jpeg(&source, 500, 400);

        let outcome = driver.process(&source, &[], Quality::default());

        // One outcome per default width, in order; widths above 500 skipped
        assert_eq!(outcome.outcomes.len(), driver.default_widths().len());
        assert!(outcome.outcomes[0].is_produced()); // 300
        assert!(outcome.outcomes[1].is_produced()); // 400
        assert!(!outcome.outcomes[2].is_produced()); // 600 -> skipped
        assert!(outcome.success());
    }

    #[test]
    fn corrupt_file_fails_per_width_not_per_batch() {
        let dir = tempfile::tempdir().unwrap();
        let driver = driver_in(dir.path());

        let source = dir.path().join("uploads").join("broken.jpg");
        std::fs::write(&source, b"\xFF\xD8\xFF junk that is no jpeg").unwrap();

        let outcome = driver.process(&source, &[300, 400], Quality::default());
        assert!(outcome.batch_error.is_none());
        assert_eq!(outcome.outcomes.len(), 2);
        assert!(outcome.outcomes.iter().all(|o| !o.is_produced()));
        assert!(!outcome.success());
    }

    #[test]
    fn parse_width_list_accepts_json_arrays() {
        assert_eq!(parse_width_list(r#"[300, 400, 600]"#), vec![300, 400, 600]);
        // numeric strings survive, everything else drops silently
        assert_eq!(
            parse_width_list(r#"[300, "400", "abc", null, true, -5]"#),
            vec![300, 400]
        );
        assert_eq!(parse_width_list("[]"), Vec::<u32>::new());
    }

    #[test]
    fn parse_width_list_accepts_comma_text() {
        assert_eq!(parse_width_list("300, 400,600"), vec![300, 400, 600]);
        assert_eq!(parse_width_list("300, x, 400"), vec![300, 400]);
        assert_eq!(parse_width_list("  "), Vec::<u32>::new());
    }
}

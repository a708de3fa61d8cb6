//! Header-only dimension and format inspection.
//!
//! The upscale guard needs the source width before any pixels are decoded;
//! `image::image_dimensions` reads just the header.

use std::path::Path;

use crate::error::PipelineError;

use super::format::{extension_of, ImageKind};

/// Dimensions and detected format of a source image, read without a full
/// decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub kind: ImageKind,
}

/// Probe a source image's dimensions and format.
///
/// Fails with [`PipelineError::UnsupportedFormat`] for an extension outside
/// the supported set and [`PipelineError::FormatUnreadable`] when the header
/// cannot be parsed.
pub fn inspect(path: &Path) -> Result<ImageInfo, PipelineError> {
    let kind =
        ImageKind::from_path(path).ok_or_else(|| PipelineError::UnsupportedFormat {
            path: path.to_path_buf(),
            format: extension_of(path),
        })?;

    let (width, height) =
        image::image_dimensions(path).map_err(|e| PipelineError::FormatUnreadable {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    Ok(ImageInfo {
        width,
        height,
        kind,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::test_images::write_test_jpeg;

    #[test]
    fn inspect_reads_dimensions_without_decoding() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.jpg");
        write_test_jpeg(&path, 320, 240);

        let info = inspect(&path).unwrap();
        assert_eq!(info.width, 320);
        assert_eq!(info.height, 240);
        assert_eq!(info.kind, ImageKind::Jpeg);
    }

    #[test]
    fn inspect_rejects_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.bmp");
        std::fs::write(&path, b"BM junk").unwrap();

        match inspect(&path) {
            Err(PipelineError::UnsupportedFormat { format, .. }) => assert_eq!(format, "bmp"),
            other => panic!("expected UnsupportedFormat, got {other:?}"),
        }
    }

    #[test]
    fn inspect_fails_on_garbage_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not a png at all").unwrap();

        match inspect(&path) {
            Err(PipelineError::FormatUnreadable { .. }) => {}
            other => panic!("expected FormatUnreadable, got {other:?}"),
        }
    }
}

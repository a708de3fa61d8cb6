//! The closed set of raster formats thumbmill consumes and produces.
//!
//! Format dispatch goes through [`ImageKind`] rather than string matching,
//! so adding a format is a single exhaustive-match addition the compiler
//! enforces across inspection, decoding, and encoding.

use image::ImageFormat;
use std::path::Path;

/// A supported raster format, detected from a file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageKind {
    Jpeg,
    Png,
    Gif,
    WebP,
}

/// Extensions accepted as input, lowercase. `jpg` and `jpeg` both map to
/// [`ImageKind::Jpeg`].
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

impl ImageKind {
    /// Map an extension (case-insensitive) to a format, or `None` when
    /// unsupported.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "gif" => Some(Self::Gif),
            "webp" => Some(Self::WebP),
            _ => None,
        }
    }

    /// Detect the format from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// Whether the format carries an alpha channel that must survive
    /// resampling.
    pub fn supports_alpha(self) -> bool {
        match self {
            Self::Jpeg => false,
            Self::Png | Self::Gif | Self::WebP => true,
        }
    }

    /// The `image` crate format for this kind.
    pub fn as_image_format(self) -> ImageFormat {
        match self {
            Self::Jpeg => ImageFormat::Jpeg,
            Self::Png => ImageFormat::Png,
            Self::Gif => ImageFormat::Gif,
            Self::WebP => ImageFormat::WebP,
        }
    }

    /// Canonical lowercase name for logs and reports.
    pub fn name(self) -> &'static str {
        match self {
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::Gif => "gif",
            Self::WebP => "webp",
        }
    }
}

/// The extension of a path, lowercased, or `""` when absent.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default()
}

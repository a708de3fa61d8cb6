//! The resizer: inspect, guard, decode, resample, re-encode, write.
//!
//! One call produces at most one output file. The whole sequence is
//! synchronous and blocking; a failure for one call never affects another.

use std::path::Path;

use image::codecs::gif::GifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::codecs::webp::WebPEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ExtendedColorType, ImageReader};

use crate::error::PipelineError;
use crate::types::{ProducedInfo, Quality, ResizeOutcome};

use super::format::{extension_of, ImageKind};
use super::inspect::inspect;

/// Resize `source` to `target_width` and encode the result at `dest`.
///
/// The output format is implied by the *destination* extension, not the
/// source format — the batch driver always keeps them equal, but the
/// separation is part of the contract. Aspect ratio is preserved; a target
/// wider than the source returns [`ResizeOutcome::Skipped`] without writing
/// anything; a target equal to the source width proceeds (pure
/// re-compression at the original resolution).
///
/// On success exactly one file exists at `dest`; on any failure path no
/// partial file is left behind (the encode happens fully in memory, and a
/// failed write removes whatever landed on disk).
pub fn resize(
    source: &Path,
    dest: &Path,
    target_width: u32,
    quality: Quality,
) -> Result<ResizeOutcome, PipelineError> {
    let info = inspect(source)?;

    if target_width > info.width {
        tracing::debug!(
            source = %source.display(),
            target_width,
            source_width = info.width,
            "upscale guard: skipping"
        );
        return Ok(ResizeOutcome::Skipped {
            target_width,
            source_width: info.width,
        });
    }

    let dest_kind =
        ImageKind::from_path(dest).ok_or_else(|| PipelineError::UnsupportedDestination {
            path: dest.to_path_buf(),
            format: extension_of(dest),
        })?;

    let target_height = scaled_height(target_width, info.width, info.height);

    let decoded = ImageReader::open(source)
        .map_err(|e| PipelineError::Decode {
            path: source.to_path_buf(),
            message: e.to_string(),
        })?
        .decode()
        .map_err(|e| PipelineError::Decode {
            path: source.to_path_buf(),
            message: e.to_string(),
        })?;

    // Alpha-capable sources are resampled as RGBA so transparency is blended
    // per-channel with no opaque halo; JPEG sources stay RGB.
    let canvas = if info.kind.supports_alpha() {
        let resized = image::imageops::resize(
            &decoded.to_rgba8(),
            target_width,
            target_height,
            FilterType::Lanczos3,
        );
        DynamicImage::ImageRgba8(resized)
    } else {
        let resized = image::imageops::resize(
            &decoded.to_rgb8(),
            target_width,
            target_height,
            FilterType::Lanczos3,
        );
        DynamicImage::ImageRgb8(resized)
    };

    let bytes = encode(&canvas, dest_kind, quality, dest)?;
    let byte_size = bytes.len() as u64;

    if let Err(e) = std::fs::write(dest, &bytes) {
        // Don't leave a truncated file behind
        let _ = std::fs::remove_file(dest);
        return Err(PipelineError::Write {
            path: dest.to_path_buf(),
            source: e,
        });
    }

    tracing::debug!(
        dest = %dest.display(),
        width = target_width,
        height = target_height,
        byte_size,
        "thumbnail written"
    );

    Ok(ResizeOutcome::Produced(ProducedInfo {
        width: target_width,
        height: target_height,
        byte_size,
    }))
}

/// Target height preserving aspect ratio: `round(w * src_h / src_w)`.
///
/// Computed in f64 and rounded with `f64::round`, so ties go away from zero.
/// Never returns 0 (a 1-pixel row is the floor for extreme ratios).
pub fn scaled_height(target_width: u32, source_width: u32, source_height: u32) -> u32 {
    let h = (target_width as f64 * source_height as f64 / source_width as f64).round();
    (h as u32).max(1)
}

/// Map encode quality (1-100) to the PNG 0-9 compression-level scale:
/// `9 - round(q / 11.11)`, clamped to [0, 9]. Higher level = smaller file.
pub fn png_compression_level(quality: Quality) -> u8 {
    let level = 9.0 - (quality.value() as f64 / 11.11).round();
    level.clamp(0.0, 9.0) as u8
}

/// Bucket a 0-9 PNG compression level into the zlib presets the `image`
/// crate exposes.
fn png_compression_type(level: u8) -> CompressionType {
    match level {
        0..=2 => CompressionType::Fast,
        3..=6 => CompressionType::Default,
        _ => CompressionType::Best,
    }
}

/// Encode the resampled canvas for the destination format, fully in memory.
///
/// JPEG takes quality directly. PNG maps quality to a compression level.
/// GIF is a lossless palette encode and ignores quality. WebP encoding in
/// this stack is lossless, so quality is accepted but does not change the
/// output.
fn encode(
    canvas: &DynamicImage,
    kind: ImageKind,
    quality: Quality,
    dest: &Path,
) -> Result<Vec<u8>, PipelineError> {
    let mut buf = Vec::new();
    let encode_err = |e: image::ImageError| PipelineError::Encode {
        path: dest.to_path_buf(),
        message: e.to_string(),
    };

    match kind {
        ImageKind::Jpeg => {
            let rgb = canvas.to_rgb8();
            rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut buf, quality.value()))
                .map_err(encode_err)?;
        }
        ImageKind::Png => {
            let compression = png_compression_type(png_compression_level(quality));
            canvas
                .write_with_encoder(PngEncoder::new_with_quality(
                    &mut buf,
                    compression,
                    PngFilter::Adaptive,
                ))
                .map_err(encode_err)?;
        }
        ImageKind::Gif => {
            let rgba = canvas.to_rgba8();
            let (width, height) = rgba.dimensions();
            let mut encoder = GifEncoder::new(&mut buf);
            encoder
                .encode(rgba.as_raw(), width, height, ExtendedColorType::Rgba8)
                .map_err(encode_err)?;
        }
        ImageKind::WebP => {
            canvas
                .write_with_encoder(WebPEncoder::new_lossless(&mut buf))
                .map_err(encode_err)?;
        }
    }

    Ok(buf)
}

//! Image decoding for uploaded files

use std::path::Path;

use image::{ImageFormat, RgbImage};
use tracing::debug;

use crate::error::{OcrError, Result};

/// Formats accepted by the upload control
pub const SUPPORTED_FORMATS: [ImageFormat; 2] = [ImageFormat::Png, ImageFormat::Jpeg];

/// File extensions matching [`SUPPORTED_FORMATS`]
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Decode PNG or JPEG bytes into an 8-bit RGB raster
///
/// Alpha and palette images are flattened to RGB.
pub fn load_image(bytes: &[u8]) -> Result<RgbImage> {
    let format = image::guess_format(bytes)
        .map_err(|_| OcrError::UnsupportedFormat("unrecognized image data".to_string()))?;

    if !SUPPORTED_FORMATS.contains(&format) {
        return Err(OcrError::UnsupportedFormat(format!("{:?}", format)));
    }

    let decoded = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| OcrError::UnsupportedFormat(e.to_string()))?;

    let rgb = decoded.to_rgb8();
    debug!("Decoded {:?} image: {}x{}", format, rgb.width(), rgb.height());
    Ok(rgb)
}

/// Read and decode an image file
pub fn load_image_file(path: &Path) -> Result<RgbImage> {
    let bytes = std::fs::read(path)?;
    load_image(&bytes)
}

/// Whether a file name carries one of the accepted extensions
pub fn has_supported_extension(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            SUPPORTED_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

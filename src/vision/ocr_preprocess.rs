//! Image preprocessing filters for OCR
//!
//! Turns the loaded RGB image into the single-channel raster handed to the
//! recognition engine: grayscale, inverted, then upscaled so small glyphs
//! cover enough pixels for reliable recognition.

use image::imageops::{self, FilterType};
use image::{GrayImage, Luma, RgbImage};
use tracing::debug;

/// Linear upscale factor applied before recognition
pub const UPSCALE_FACTOR: u32 = 3;

/// Run the full preprocessing chain on an RGB image
///
/// Always returns a new `3w x 3h` buffer; the input is left untouched.
pub fn apply_preprocessing(image: &RgbImage) -> GrayImage {
    let (width, height) = image.dimensions();
    debug!(
        "Preprocessing {}x{} image (grayscale, invert, {}x cubic upscale)",
        width, height, UPSCALE_FACTOR
    );

    let mut gray = apply_grayscale(image);
    apply_invert(&mut gray);
    apply_upscale(&gray, UPSCALE_FACTOR)
}

/// Convert RGB to a single luminance channel
fn apply_grayscale(image: &RgbImage) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b] = image.get_pixel(x, y).0;
        // BT.601 luminance weights
        let gray = 0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32;
        Luma([gray.round().clamp(0.0, 255.0) as u8])
    })
}

/// Invert intensities in place (dark text on light becomes light on dark)
fn apply_invert(image: &mut GrayImage) {
    imageops::invert(image);
}

/// Upscale both axes by an integer factor using cubic interpolation
fn apply_upscale(image: &GrayImage, scale: u32) -> GrayImage {
    if scale <= 1 {
        return image.clone();
    }

    let new_width = image.width() * scale;
    let new_height = image.height() * scale;
    imageops::resize(image, new_width, new_height, FilterType::CatmullRom)
}

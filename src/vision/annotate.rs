//! Drawing detection boxes and labels onto the original image

use std::path::Path;

use ab_glyph::FontArc;
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use tracing::{debug, info};

use crate::config::AnnotationConfig;
use crate::error::{OcrError, Result};
use crate::vision::extract::WordDetection;

/// Gap between the label baseline and the box top edge
const LABEL_GAP: i32 = 5;

/// Colors, stroke and font used for annotations
#[derive(Clone)]
pub struct AnnotationStyle {
    pub color: Rgb<u8>,
    pub thickness: u32,
    pub font_size: f32,
    pub font: FontArc,
}

impl std::fmt::Debug for AnnotationStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnnotationStyle")
            .field("color", &self.color)
            .field("thickness", &self.thickness)
            .field("font_size", &self.font_size)
            .finish_non_exhaustive()
    }
}

impl AnnotationStyle {
    /// Build the style from configuration, loading the label font
    pub fn from_config(config: &AnnotationConfig) -> Result<Self> {
        let font = match &config.font_path {
            Some(path) => load_font_file(path)?,
            None => bundled_font()?,
        };

        Ok(Self {
            color: Rgb(config.color),
            thickness: config.thickness,
            font_size: config.font_size,
            font,
        })
    }
}

/// Load a TrueType/OpenType font from disk
pub fn load_font_file(path: &Path) -> Result<FontArc> {
    let data = std::fs::read(path)?;
    let font = FontArc::try_from_vec(data)
        .map_err(|e| OcrError::Font(format!("{}: {}", path.display(), e)))?;
    info!("Loaded label font from {:?}", path);
    Ok(font)
}

/// The monospace font shipped with the UI toolkit
pub fn bundled_font() -> Result<FontArc> {
    let definitions = egui::FontDefinitions::default();
    let data = definitions
        .font_data
        .get("Hack")
        .ok_or_else(|| OcrError::Font("bundled font \"Hack\" not available".to_string()))?;

    FontArc::try_from_vec(data.font.to_vec())
        .map_err(|e| OcrError::Font(format!("bundled font: {}", e)))
}

/// Draw one rectangle and one label per detection on a copy of `image`
pub fn annotate(image: &RgbImage, detections: &[WordDetection], style: &AnnotationStyle) -> RgbImage {
    let mut annotated = image.clone();

    for detection in detections {
        draw_box(&mut annotated, detection, style);
        draw_label(&mut annotated, detection, style);
    }

    debug!("Annotated {} detections", detections.len());
    annotated
}

/// Unfilled rectangle from (x, y) to (x + w, y + h) inclusive
///
/// Strokes are centred on that outline; an even `thickness` puts the extra
/// ring outside the box.
fn draw_box(canvas: &mut RgbImage, detection: &WordDetection, style: &AnnotationStyle) {
    let x = detection.x() as i32;
    let y = detection.y() as i32;
    let width = detection.width() as i32 + 1;
    let height = detection.height() as i32 + 1;

    for offset in ring_offsets(style.thickness) {
        let rw = width + offset * 2;
        let rh = height + offset * 2;
        if rw <= 0 || rh <= 0 {
            continue;
        }

        let rect = Rect::at(x - offset, y - offset).of_size(rw as u32, rh as u32);
        draw_hollow_rect_mut(canvas, rect, style.color);
    }
}

/// Ring offsets relative to the outline, positive going outward
fn ring_offsets(thickness: u32) -> std::ops::RangeInclusive<i32> {
    let thickness = thickness.max(1) as i32;
    -((thickness - 1) / 2)..=thickness / 2
}

/// Label with its baseline just above the box; clipped at the image border
fn draw_label(canvas: &mut RgbImage, detection: &WordDetection, style: &AnnotationStyle) {
    let label = detection.label();
    let (_, text_height) = text_size(style.font_size, &style.font, &label);
    let top = detection.y() as i32 - LABEL_GAP - text_height as i32;

    draw_text_mut(
        canvas,
        style.color,
        detection.x() as i32,
        top,
        style.font_size,
        &style.font,
        &label,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREEN: Rgb<u8> = Rgb([0, 255, 0]);
    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

    fn style() -> AnnotationStyle {
        AnnotationStyle::from_config(&AnnotationConfig::default()).unwrap()
    }

    fn detection(bounding_box: [u32; 4]) -> WordDetection {
        WordDetection {
            text: "HELLO123".to_string(),
            confidence: 93,
            bounding_box,
        }
    }

    #[test]
    fn test_same_dimensions_and_original_untouched() {
        let original = RgbImage::from_pixel(120, 80, WHITE);
        let snapshot = original.as_raw().clone();

        let annotated = annotate(&original, &[detection([10, 40, 30, 15])], &style());

        assert_eq!(annotated.dimensions(), original.dimensions());
        assert_eq!(original.as_raw(), &snapshot);
        assert_ne!(annotated.as_raw(), &snapshot);
    }

    #[test]
    fn test_box_edges_drawn() {
        let original = RgbImage::from_pixel(120, 80, WHITE);
        let annotated = annotate(&original, &[detection([10, 40, 30, 15])], &style());

        assert_eq!(annotated.get_pixel(10, 40), &GREEN);
        assert_eq!(annotated.get_pixel(40, 55), &GREEN);
        // Second ring of the 2 px stroke lies outside the box
        assert_eq!(annotated.get_pixel(9, 39), &GREEN);
        assert_eq!(annotated.get_pixel(41, 56), &GREEN);
        assert_eq!(annotated.get_pixel(11, 41), &WHITE);
        // Interior stays clear
        assert_eq!(annotated.get_pixel(25, 47), &WHITE);
    }

    #[test]
    fn test_ring_offsets_centred_on_outline() {
        assert_eq!(ring_offsets(0).collect::<Vec<_>>(), vec![0]);
        assert_eq!(ring_offsets(1).collect::<Vec<_>>(), vec![0]);
        assert_eq!(ring_offsets(2).collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(ring_offsets(3).collect::<Vec<_>>(), vec![-1, 0, 1]);
        assert_eq!(ring_offsets(4).collect::<Vec<_>>(), vec![-1, 0, 1, 2]);
    }

    #[test]
    fn test_label_drawn_above_box() {
        let original = RgbImage::from_pixel(200, 80, WHITE);
        let annotated = annotate(&original, &[detection([10, 50, 30, 15])], &style());

        let label_pixels = (0..200)
            .flat_map(|x| (0..45).map(move |y| (x, y)))
            .filter(|&(x, y)| annotated.get_pixel(x, y) != &WHITE)
            .count();
        assert!(label_pixels > 0);
    }

    #[test]
    fn test_no_detections_is_plain_copy() {
        let original = RgbImage::from_pixel(10, 10, Rgb([1, 2, 3]));
        let annotated = annotate(&original, &[], &style());
        assert_eq!(annotated, original);
    }

    #[test]
    fn test_boxes_at_border_are_clipped() {
        let original = RgbImage::from_pixel(20, 20, WHITE);
        let annotated = annotate(
            &original,
            &[detection([0, 0, 0, 0]), detection([15, 15, 40, 40])],
            &style(),
        );
        assert_eq!(annotated.dimensions(), (20, 20));
        assert_eq!(annotated.get_pixel(0, 0), &GREEN);
    }

    #[test]
    fn test_missing_font_file() {
        let config = AnnotationConfig {
            font_path: Some("/nonexistent/font.ttf".into()),
            ..Default::default()
        };
        assert!(AnnotationStyle::from_config(&config).is_err());
    }

    #[test]
    fn test_invalid_font_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"not a font").unwrap();

        let result = load_font_file(file.path());
        assert!(matches!(result, Err(OcrError::Font(_))));
    }
}

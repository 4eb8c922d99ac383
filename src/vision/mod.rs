//! Vision/OCR Layer
//!
//! Preprocesses the loaded image, hands it to the recognition engine and turns
//! the engine output into word detections drawn over the original image.

pub mod annotate;
pub mod engine;
pub mod extract;
pub mod loader;
pub mod ocr_preprocess;
pub mod tesseract;

pub use annotate::{annotate, AnnotationStyle};
pub use engine::{EngineToken, RecognitionEngine, RecognitionMode};
pub use extract::{extract_text_data, WordDetection};
pub use loader::{load_image, load_image_file};
pub use ocr_preprocess::{apply_preprocessing, UPSCALE_FACTOR};
pub use tesseract::TesseractEngine;

use std::time::Instant;

use image::{GrayImage, RgbImage};
use tracing::{debug, info};

use crate::error::Result;

/// Everything produced by one OCR run
#[derive(Debug, Clone)]
pub struct OcrRun {
    /// Grayscale, inverted, upscaled raster sent to the engine
    pub preprocessed: GrayImage,
    /// Flat text from the engine
    pub text: String,
    /// Confident words in original-image coordinates
    pub detections: Vec<WordDetection>,
    /// Original image with boxes and labels
    pub annotated: RgbImage,
    /// Wall time of the whole run in milliseconds
    pub processing_time_ms: u64,
}

/// Preprocess -> recognize -> extract -> annotate
///
/// Holds no state between runs; every call starts from the image it is given.
pub struct OcrPipeline {
    engine: Box<dyn RecognitionEngine>,
    mode: RecognitionMode,
    style: AnnotationStyle,
}

impl OcrPipeline {
    pub fn new(engine: Box<dyn RecognitionEngine>, mode: RecognitionMode, style: AnnotationStyle) -> Self {
        Self { engine, mode, style }
    }

    /// Recognition mode passed to every engine call
    pub fn mode(&self) -> &RecognitionMode {
        &self.mode
    }

    /// Run the full pipeline; the first failing stage ends the run
    pub fn process(&self, image: &RgbImage) -> Result<OcrRun> {
        let start = Instant::now();

        let preprocessed = apply_preprocessing(image);
        debug!(
            "Preprocessed to {}x{}",
            preprocessed.width(),
            preprocessed.height()
        );

        // Text and word boxes come from separate engine runs
        let text = self.engine.image_to_string(&preprocessed, &self.mode)?;
        let tokens = self.engine.image_to_data(&preprocessed, &self.mode)?;

        let detections = extract_text_data(&tokens, UPSCALE_FACTOR)?;
        let annotated = annotate(image, &detections, &self.style);

        let processing_time = start.elapsed();
        info!(
            "OCR run complete in {:?}: {} words, {} chars of text",
            processing_time,
            detections.len(),
            text.len()
        );

        Ok(OcrRun {
            preprocessed,
            text,
            detections,
            annotated,
            processing_time_ms: processing_time.as_millis() as u64,
        })
    }
}

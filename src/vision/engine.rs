//! Recognition engine abstraction
//!
//! The engine is an opaque collaborator: it receives the preprocessed raster
//! and hands back either a flat string or a list of positioned tokens. Nothing
//! here interprets the values it returns.

use image::GrayImage;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::{OcrError, Result};

/// Fixed recognition behavior for the lifetime of the process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognitionMode {
    /// OCR engine mode (3 = engine default)
    pub oem: u32,
    /// Page segmentation mode (6 = assume a single uniform block of text)
    pub psm: u32,
    /// Characters the engine may emit
    pub whitelist: String,
    /// Trained language data to load
    pub language: String,
}

impl Default for RecognitionMode {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl RecognitionMode {
    /// Build the mode from the engine section of the configuration
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            oem: config.oem,
            psm: config.psm,
            whitelist: config.whitelist.clone(),
            language: config.language.clone(),
        }
    }

    /// Command-line arguments selecting this mode
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![
            "-l".to_string(),
            self.language.clone(),
            "--oem".to_string(),
            self.oem.to_string(),
            "--psm".to_string(),
            self.psm.to_string(),
        ];
        if !self.whitelist.is_empty() {
            args.push("-c".to_string());
            args.push(format!("tessedit_char_whitelist={}", self.whitelist));
        }
        args
    }
}

/// One row of structured engine output
///
/// Coordinates are in the pixel space of the image passed to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineToken {
    /// Hierarchy level (1 = page ... 5 = word)
    pub level: u32,
    /// Recognized text, empty for non-word rows
    pub text: String,
    /// Raw confidence score as emitted by the engine
    pub conf: String,
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl EngineToken {
    /// Convenience constructor for a word-level token
    pub fn word(text: &str, conf: &str, left: u32, top: u32, width: u32, height: u32) -> Self {
        Self {
            level: 5,
            text: text.to_string(),
            conf: conf.to_string(),
            left,
            top,
            width,
            height,
        }
    }
}

/// External recognition engine
pub trait RecognitionEngine {
    /// Recognize the image as a flat string
    fn image_to_string(&self, image: &GrayImage, mode: &RecognitionMode) -> Result<String>;

    /// Recognize the image as positioned tokens, in engine emission order
    fn image_to_data(&self, image: &GrayImage, mode: &RecognitionMode) -> Result<Vec<EngineToken>>;
}

const TSV_COLUMNS: usize = 12;

/// Parse tab-separated structured output into tokens
///
/// The header row is skipped. Rows without a text column get an empty text.
pub fn parse_tsv(tsv: &str) -> Result<Vec<EngineToken>> {
    let mut tokens = Vec::new();

    for (idx, row) in tsv.lines().enumerate() {
        if idx == 0 || row.trim().is_empty() {
            continue;
        }

        let cols: Vec<&str> = row.split('\t').collect();
        if cols.len() < TSV_COLUMNS - 1 {
            return Err(OcrError::EngineFailure(format!(
                "structured output row {} has {} columns, expected {}",
                idx,
                cols.len(),
                TSV_COLUMNS
            )));
        }

        let number = |col: usize| -> Result<u32> {
            cols[col].trim().parse::<u32>().map_err(|_| {
                OcrError::EngineFailure(format!(
                    "structured output row {} column {} is not a number: {:?}",
                    idx, col, cols[col]
                ))
            })
        };

        tokens.push(EngineToken {
            level: number(0)?,
            left: number(6)?,
            top: number(7)?,
            width: number(8)?,
            height: number(9)?,
            conf: cols[10].trim().to_string(),
            text: cols.get(11).map(|t| t.to_string()).unwrap_or_default(),
        });
    }

    Ok(tokens)
}

//! Error types for the OCR pipeline

use thiserror::Error;

/// Failures that end an OCR run
///
/// No stage retries and no partial output survives one of these.
#[derive(Debug, Error)]
pub enum OcrError {
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("Recognition engine unavailable ({command}): {reason}")]
    EngineUnavailable { command: String, reason: String },

    #[error("Recognition engine failed: {0}")]
    EngineFailure(String),

    #[error("Malformed confidence {value:?} for token {text:?}")]
    MalformedConfidence { text: String, value: String },

    #[error("Font loading failed: {0}")]
    Font(String),

    #[error("Image processing failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, OcrError>;

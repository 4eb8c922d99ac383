//! Tesseract command-line backend
//!
//! Each call writes the raster to a scratch PNG and runs the configured
//! `tesseract` executable against it, reading results from stdout.

use std::io::{ErrorKind, Write};
use std::process::{Command, Output};

use image::{GrayImage, ImageFormat};
use tracing::{debug, info};

use crate::error::{OcrError, Result};
use crate::vision::engine::{parse_tsv, EngineToken, RecognitionEngine, RecognitionMode};

/// Tesseract invoked as an external process
#[derive(Debug, Clone)]
pub struct TesseractEngine {
    command: String,
}

impl TesseractEngine {
    /// Create an engine that runs the given executable (name on PATH or full path)
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// Executable this engine invokes
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Probe the executable and return its version line
    pub fn version(&self) -> Result<String> {
        let output = self.spawn(Command::new(&self.command).arg("--version"))?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        // Older releases print the banner on stderr
        let version = stdout
            .lines()
            .chain(stderr.lines())
            .find(|line| !line.trim().is_empty())
            .unwrap_or("tesseract")
            .trim()
            .to_string();

        info!("Recognition engine available: {}", version);
        Ok(version)
    }

    /// Run recognition on the image, optionally selecting an output config (e.g. `tsv`)
    fn run(&self, image: &GrayImage, mode: &RecognitionMode, output_config: Option<&str>) -> Result<String> {
        let mut input = tempfile::Builder::new()
            .prefix("textlens-")
            .suffix(".png")
            .tempfile()?;
        image.write_to(&mut input, ImageFormat::Png)?;
        input.flush()?;

        let mut command = Command::new(&self.command);
        command.arg(input.path()).arg("stdout").args(mode.args());
        if let Some(config) = output_config {
            command.arg(config);
        }

        debug!(
            "Running {} on {}x{} image ({})",
            self.command,
            image.width(),
            image.height(),
            output_config.unwrap_or("text")
        );

        let output = self.spawn(&mut command)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::EngineFailure(format!(
                "{} exited with {}: {}",
                self.command,
                output.status,
                stderr.trim()
            )));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| OcrError::EngineFailure(format!("output is not valid UTF-8: {}", e)))
    }

    fn spawn(&self, command: &mut Command) -> Result<Output> {
        command.output().map_err(|e| OcrError::EngineUnavailable {
            command: self.command.clone(),
            reason: match e.kind() {
                ErrorKind::NotFound => "executable not found".to_string(),
                _ => e.to_string(),
            },
        })
    }
}

impl RecognitionEngine for TesseractEngine {
    fn image_to_string(&self, image: &GrayImage, mode: &RecognitionMode) -> Result<String> {
        self.run(image, mode, None)
    }

    fn image_to_data(&self, image: &GrayImage, mode: &RecognitionMode) -> Result<Vec<EngineToken>> {
        let tsv = self.run(image, mode, Some("tsv"))?;
        let tokens = parse_tsv(&tsv)?;
        debug!("Engine returned {} structured rows", tokens.len());
        Ok(tokens)
    }
}

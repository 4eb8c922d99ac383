//! Application Coordinator
//!
//! Builds the OCR pipeline from configuration once at startup and drives a
//! session either headless (one run, results to stdout) or through the
//! dashboard window.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::ImageFormat;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::shared::{detections_to_json, Session};
use crate::storage;
use crate::vision::{load_image_file, AnnotationStyle, OcrPipeline, RecognitionMode, TesseractEngine};

/// Output format of a headless run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Raw recognized text
    #[default]
    Text,
    /// Word detections as indented JSON
    Json,
}

/// What a headless run should produce besides stdout
#[derive(Debug, Clone, Default)]
pub struct HeadlessOptions {
    pub image: PathBuf,
    pub format: OutputFormat,
    pub save_annotated: Option<PathBuf>,
    pub save_preprocessed: Option<PathBuf>,
}

/// Everything wired up from configuration
pub struct AppContext {
    pub config: AppConfig,
    pub pipeline: OcrPipeline,
    /// Engine version, or why the engine cannot be used
    pub engine_status: Result<String, String>,
}

impl AppContext {
    /// Create the output directory, probe the engine and build the pipeline
    pub fn new(config: AppConfig) -> Result<Self> {
        storage::ensure_output_dir(&config.output.dir)
            .with_context(|| format!("Failed to create output directory {:?}", config.output.dir))?;

        let engine = TesseractEngine::new(config.engine.tesseract_cmd.clone());
        info!("Using recognition engine {:?}", engine.command());
        let engine_status = engine.version().map_err(|e| e.to_string());
        if let Err(e) = &engine_status {
            warn!("{}", e);
        }

        let style = AnnotationStyle::from_config(&config.annotation)
            .context("Failed to prepare annotation style")?;
        let mode = RecognitionMode::from_config(&config.engine);
        let pipeline = OcrPipeline::new(Box::new(engine), mode, style);
        info!("Recognition arguments: {}", pipeline.mode().args().join(" "));

        Ok(Self {
            config,
            pipeline,
            engine_status,
        })
    }
}

/// Run the pipeline once on an image file and write the result to `out`
pub fn run_headless(context: &AppContext, options: &HeadlessOptions, out: &mut impl Write) -> Result<()> {
    let image = load_image_file(&options.image)
        .with_context(|| format!("Failed to load {:?}", options.image))?;

    let name = display_name(&options.image);
    let mut session = Session::new();
    session.set_image(&name, image);

    let run = session.run_ocr(&context.pipeline)?;

    if let Some(path) = &options.save_annotated {
        run.annotated
            .save_with_format(path, ImageFormat::Png)
            .with_context(|| format!("Failed to write {:?}", path))?;
        info!("Wrote annotated image to {:?}", path);
    }
    if let Some(path) = &options.save_preprocessed {
        run.preprocessed
            .save_with_format(path, ImageFormat::Png)
            .with_context(|| format!("Failed to write {:?}", path))?;
        info!("Wrote preprocessed image to {:?}", path);
    }

    match options.format {
        OutputFormat::Text => write!(out, "{}", run.text)?,
        OutputFormat::Json => {
            let json = detections_to_json(&run.detections)?;
            writeln!(out, "{}", json)?;
        }
    }

    Ok(())
}

/// File name shown for a path
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

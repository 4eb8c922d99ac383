//! Per-session state for the OCR viewer
//!
//! The session is owned by whoever drives it (the dashboard or the headless
//! runner) and every user action is a method call on it. Nothing here is
//! global; dropping the session drops all results.

use image::RgbImage;
use thiserror::Error;
use tracing::{error, info};

use crate::error::OcrError;
use crate::shared::export::detections_to_json;
use crate::vision::{load_image, OcrPipeline, OcrRun};

/// Where the session is in the upload -> run -> display cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// No image yet
    #[default]
    Idle,
    /// Image uploaded, not processed
    Loaded,
    /// OCR requested and running
    Processing,
    /// Results available
    Displayed,
}

impl SessionPhase {
    pub fn name(&self) -> &'static str {
        match self {
            SessionPhase::Idle => "Idle",
            SessionPhase::Loaded => "Loaded",
            SessionPhase::Processing => "Processing",
            SessionPhase::Displayed => "Displayed",
        }
    }
}

/// Errors from session actions
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("No image loaded")]
    NoImage,

    #[error("OCR is already running")]
    Busy,

    #[error(transparent)]
    Ocr(#[from] OcrError),
}

/// The uploaded image and the name it came with
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub name: String,
    pub image: RgbImage,
}

/// State of one user session
#[derive(Debug, Default)]
pub struct Session {
    phase: SessionPhase,
    source: Option<LoadedImage>,
    run: Option<OcrRun>,
    last_error: Option<String>,
    /// Bumped whenever the displayed images change
    revision: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn source(&self) -> Option<&LoadedImage> {
        self.source.as_ref()
    }

    pub fn run(&self) -> Option<&OcrRun> {
        self.run.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Decode uploaded bytes and start over with the new image
    ///
    /// A file that fails to decode leaves the current state untouched.
    pub fn upload(&mut self, name: &str, bytes: &[u8]) -> Result<(), SessionError> {
        match load_image(bytes) {
            Ok(image) => {
                self.set_image(name, image);
                Ok(())
            }
            Err(e) => Err(self.fail(e.into())),
        }
    }

    /// Start over with an already decoded image
    pub fn set_image(&mut self, name: &str, image: RgbImage) {
        info!("Loaded {} ({}x{})", name, image.width(), image.height());
        self.source = Some(LoadedImage {
            name: name.to_string(),
            image,
        });
        self.run = None;
        self.last_error = None;
        self.phase = SessionPhase::Loaded;
        self.revision += 1;
    }

    /// Mark OCR as requested; the run itself happens in [`Session::complete_ocr`]
    pub fn begin_ocr(&mut self) -> Result<(), SessionError> {
        match self.phase {
            SessionPhase::Idle => Err(self.fail(SessionError::NoImage)),
            SessionPhase::Processing => Err(SessionError::Busy),
            SessionPhase::Loaded | SessionPhase::Displayed => {
                self.phase = SessionPhase::Processing;
                self.last_error = None;
                Ok(())
            }
        }
    }

    /// Run the pipeline on the loaded image; blocks until done
    ///
    /// On failure the session returns to `Loaded` with no results shown.
    pub fn complete_ocr(&mut self, pipeline: &OcrPipeline) -> Result<&OcrRun, SessionError> {
        if self.phase != SessionPhase::Processing {
            self.begin_ocr()?;
        }

        let Some(source) = &self.source else {
            self.phase = SessionPhase::Idle;
            return Err(self.fail(SessionError::NoImage));
        };

        match pipeline.process(&source.image) {
            Ok(run) => {
                self.phase = SessionPhase::Displayed;
                self.revision += 1;
                Ok(self.run.insert(run))
            }
            Err(e) => {
                self.run = None;
                self.phase = SessionPhase::Loaded;
                self.revision += 1;
                Err(self.fail(e.into()))
            }
        }
    }

    /// Request and run OCR in one step
    pub fn run_ocr(&mut self, pipeline: &OcrPipeline) -> Result<&OcrRun, SessionError> {
        self.begin_ocr()?;
        self.complete_ocr(pipeline)
    }

    /// Raw recognized text of the displayed run
    pub fn export_text(&self) -> Option<&str> {
        self.run.as_ref().map(|run| run.text.as_str())
    }

    /// Detections of the displayed run as indented JSON
    pub fn export_json(&self) -> Option<Result<String, OcrError>> {
        self.run.as_ref().map(|run| detections_to_json(&run.detections))
    }

    fn fail(&mut self, err: SessionError) -> SessionError {
        error!("{}", err);
        self.last_error = Some(err.to_string());
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vision::testing::{pipeline, FakeEngine};
    use crate::vision::EngineToken;
    use image::{DynamicImage, ImageFormat, Rgb};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb([255, 255, 255]));
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn word_engine() -> FakeEngine {
        FakeEngine::new(
            "HELLO123\n",
            vec![EngineToken::word("HELLO123", "88", 30, 60, 90, 45)],
        )
    }

    #[test]
    fn test_starts_idle() {
        let session = Session::new();
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert!(session.source().is_none());
        assert!(session.export_text().is_none());
    }

    #[test]
    fn test_upload_moves_to_loaded() {
        let mut session = Session::new();
        session.upload("page.png", &png_bytes(40, 20)).unwrap();

        assert_eq!(session.phase(), SessionPhase::Loaded);
        let source = session.source().unwrap();
        assert_eq!(source.name, "page.png");
        assert_eq!(source.image.dimensions(), (40, 20));
    }

    #[test]
    fn test_run_moves_to_displayed() {
        let mut session = Session::new();
        session.upload("page.png", &png_bytes(40, 20)).unwrap();

        let run = session.run_ocr(&pipeline(word_engine())).unwrap();
        assert_eq!(run.detections.len(), 1);
        assert_eq!(run.detections[0].bounding_box, [10, 20, 30, 15]);

        assert_eq!(session.phase(), SessionPhase::Displayed);
        assert_eq!(session.export_text(), Some("HELLO123\n"));
    }

    #[test]
    fn test_begin_then_complete() {
        let mut session = Session::new();
        session.upload("page.png", &png_bytes(10, 10)).unwrap();

        session.begin_ocr().unwrap();
        assert_eq!(session.phase(), SessionPhase::Processing);
        assert!(matches!(session.begin_ocr(), Err(SessionError::Busy)));

        session.complete_ocr(&pipeline(word_engine())).unwrap();
        assert_eq!(session.phase(), SessionPhase::Displayed);
    }

    #[test]
    fn test_run_without_image() {
        let mut session = Session::new();
        let result = session.run_ocr(&pipeline(word_engine()));

        assert!(matches!(result, Err(SessionError::NoImage)));
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert_eq!(session.last_error(), Some("No image loaded"));
    }

    #[test]
    fn test_new_upload_discards_results() {
        let mut session = Session::new();
        session.upload("first.png", &png_bytes(10, 10)).unwrap();
        session.run_ocr(&pipeline(word_engine())).unwrap();

        session.upload("second.png", &png_bytes(12, 8)).unwrap();

        assert_eq!(session.phase(), SessionPhase::Loaded);
        assert!(session.run().is_none());
        assert!(session.export_json().is_none());
        assert_eq!(session.source().unwrap().name, "second.png");
    }

    #[test]
    fn test_bad_upload_keeps_state() {
        let mut session = Session::new();
        session.upload("first.png", &png_bytes(10, 10)).unwrap();
        session.run_ocr(&pipeline(word_engine())).unwrap();

        let result = session.upload("notes.txt", b"plain text");

        assert!(matches!(
            result,
            Err(SessionError::Ocr(OcrError::UnsupportedFormat(_)))
        ));
        assert_eq!(session.phase(), SessionPhase::Displayed);
        assert_eq!(session.source().unwrap().name, "first.png");
        assert!(session.last_error().is_some());
    }

    #[test]
    fn test_engine_failure_shows_error_and_no_results() {
        let mut session = Session::new();
        session.upload("page.png", &png_bytes(10, 10)).unwrap();

        let result = session.run_ocr(&pipeline(FakeEngine::unavailable()));

        assert!(matches!(
            result,
            Err(SessionError::Ocr(OcrError::EngineUnavailable { .. }))
        ));
        assert_eq!(session.phase(), SessionPhase::Loaded);
        assert!(session.run().is_none());
        assert!(session.last_error().unwrap().contains("unavailable"));
    }

    #[test]
    fn test_failed_rerun_drops_previous_results() {
        let mut session = Session::new();
        session.upload("page.png", &png_bytes(10, 10)).unwrap();
        session.run_ocr(&pipeline(word_engine())).unwrap();

        let bad = FakeEngine::new("X", vec![EngineToken::word("X", "bad", 0, 0, 3, 3)]);
        assert!(session.run_ocr(&pipeline(bad)).is_err());

        assert_eq!(session.phase(), SessionPhase::Loaded);
        assert!(session.export_text().is_none());
    }

    #[test]
    fn test_export_json_empty() {
        let mut session = Session::new();
        session.upload("blank.png", &png_bytes(10, 10)).unwrap();
        session.run_ocr(&pipeline(FakeEngine::new("", vec![]))).unwrap();

        assert_eq!(session.export_json().unwrap().unwrap(), "[]");
    }

    #[test]
    fn test_revision_changes_on_upload_and_run() {
        let mut session = Session::new();
        let r0 = session.revision();
        session.upload("page.png", &png_bytes(10, 10)).unwrap();
        let r1 = session.revision();
        session.run_ocr(&pipeline(word_engine())).unwrap();
        let r2 = session.revision();

        assert!(r0 < r1 && r1 < r2);
    }
}

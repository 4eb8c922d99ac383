//! Dashboard application entry point

use eframe::egui;
use std::path::Path;
use tracing::{error, info, warn};

use crate::app::{display_name, AppContext};
use crate::config::{AppConfig, WindowConfig};
use crate::dashboard::components::render_sidebar;
use crate::dashboard::state::{DashboardState, ExportKind};
use crate::dashboard::theme;
use crate::dashboard::views::render_results_view;
use crate::shared::{save_export, Session, SessionPhase, JSON_FILE_NAME, TEXT_FILE_NAME};
use crate::vision::loader::has_supported_extension;
use crate::vision::OcrPipeline;

/// The main dashboard application
pub struct DashboardApp {
    /// Loaded configuration
    config: AppConfig,
    /// Pipeline shared by every run in this window
    pipeline: OcrPipeline,
    /// Engine version or the reason it is unusable
    engine_status: Result<String, String>,
    /// Image, results and phase
    session: Session,
    /// Dashboard-specific state
    dashboard_state: DashboardState,
    /// Whether theme has been applied
    theme_applied: bool,
}

impl DashboardApp {
    /// Create a new dashboard application
    pub fn new(context: AppContext) -> Self {
        let AppContext {
            config,
            pipeline,
            engine_status,
        } = context;

        Self {
            config,
            pipeline,
            engine_status,
            session: Session::new(),
            dashboard_state: DashboardState::default(),
            theme_applied: false,
        }
    }

    /// Get native options for the dashboard window
    pub fn options(window: &WindowConfig) -> eframe::NativeOptions {
        eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([window.width, window.height])
                .with_min_inner_size([800.0, 500.0])
                .with_title("TextLens")
                .with_drag_and_drop(true),
            ..Default::default()
        }
    }

    /// Finish a run started on the previous frame
    fn process_ocr(&mut self) {
        if self.session.phase() != SessionPhase::Processing {
            return;
        }
        match self.session.complete_ocr(&self.pipeline) {
            Ok(run) => info!(
                "Displayed {} words after {} ms",
                run.detections.len(),
                run.processing_time_ms
            ),
            // The session keeps the error for the status card
            Err(e) => warn!("OCR run failed: {}", e),
        }
    }

    /// Upload files dropped onto the window
    fn process_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        // The session holds a single image; prefer the first one with an image extension
        let Some(file) = dropped
            .iter()
            .find(|file| has_supported_extension(&dropped_name(file)))
            .or(dropped.first())
        else {
            return;
        };

        let name = dropped_name(file);
        let result = match (&file.bytes, &file.path) {
            (Some(bytes), _) => Ok(bytes.to_vec()),
            (None, Some(path)) => std::fs::read(path),
            (None, None) => return,
        };

        match result {
            Ok(bytes) => self.upload(&name, &bytes),
            Err(e) => self.dashboard_state.error(format!("Failed to read dropped file: {}", e)),
        }
    }

    /// Handle button presses recorded during the last frame
    fn process_commands(&mut self, ctx: &egui::Context) {
        if std::mem::take(&mut self.dashboard_state.pending_open) {
            let input = self.dashboard_state.path_input.trim().to_string();
            if input.is_empty() {
                self.dashboard_state.error("Enter an image path first");
            } else {
                let path = Path::new(&input);
                match std::fs::read(path) {
                    Ok(bytes) => self.upload(&display_name(path), &bytes),
                    Err(e) => self.dashboard_state.error(format!("Failed to read {}: {}", input, e)),
                }
            }
        }

        if std::mem::take(&mut self.dashboard_state.pending_run) {
            match self.session.begin_ocr() {
                Ok(()) => {
                    self.dashboard_state.notice = None;
                    // Draw the spinner before the blocking run
                    ctx.request_repaint();
                }
                Err(e) => self.dashboard_state.error(e.to_string()),
            }
        }

        if let Some(kind) = self.dashboard_state.pending_copy.take() {
            match self.export_contents(kind) {
                Some(Ok(contents)) => {
                    ctx.copy_text(contents);
                    self.dashboard_state.info(format!("Copied {} to clipboard", kind.label()));
                }
                Some(Err(e)) => self.dashboard_state.error(e),
                None => self.dashboard_state.error("Nothing to copy yet"),
            }
        }

        if let Some(kind) = self.dashboard_state.pending_save.take() {
            let file_name = match kind {
                ExportKind::Text => TEXT_FILE_NAME,
                ExportKind::Json => JSON_FILE_NAME,
            };
            match self.export_contents(kind) {
                Some(Ok(contents)) => match save_export(&self.config.output.dir, file_name, &contents) {
                    Ok(path) => self.dashboard_state.info(format!("Saved {}", path.display())),
                    Err(e) => {
                        error!("Failed to save {}: {}", file_name, e);
                        self.dashboard_state.error(format!("Failed to save {}: {}", file_name, e));
                    }
                },
                Some(Err(e)) => self.dashboard_state.error(e),
                None => self.dashboard_state.error("Nothing to save yet"),
            }
        }
    }

    fn upload(&mut self, name: &str, bytes: &[u8]) {
        match self.session.upload(name, bytes) {
            Ok(()) => {
                self.dashboard_state.info(format!("Loaded {}", name));
                self.dashboard_state.path_input.clear();
            }
            Err(e) => self.dashboard_state.error(e.to_string()),
        }
    }

    fn export_contents(&self, kind: ExportKind) -> Option<Result<String, String>> {
        match kind {
            ExportKind::Text => self.session.export_text().map(|text| Ok(text.to_string())),
            ExportKind::Json => self
                .session
                .export_json()
                .map(|json| json.map_err(|e| e.to_string())),
        }
    }
}

/// Name of a dropped file; native drops only carry the path
fn dropped_name(file: &egui::DroppedFile) -> String {
    match &file.path {
        Some(path) if file.name.is_empty() => display_name(path),
        _ => file.name.clone(),
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply theme on first frame
        if !self.theme_applied {
            theme::apply_theme(ctx);
            self.theme_applied = true;
        }

        self.process_ocr();
        self.process_dropped_files(ctx);
        self.process_commands(ctx);

        self.dashboard_state.textures.sync(ctx, &self.session);

        egui::SidePanel::left("sidebar")
            .resizable(false)
            .exact_width(260.0)
            .show(ctx, |ui| {
                render_sidebar(ui, &mut self.dashboard_state, &self.session, &self.engine_status);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            render_results_view(ui, &mut self.dashboard_state, &self.session);
        });
    }
}

/// Run the dashboard application
pub fn run_dashboard(context: AppContext) -> Result<(), eframe::Error> {
    let options = DashboardApp::options(&context.config.window);
    let app = DashboardApp::new(context);
    eframe::run_native(
        "TextLens",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_dropped_name_from_path() {
        let file = egui::DroppedFile {
            path: Some(PathBuf::from("/home/user/scan.png")),
            ..Default::default()
        };
        assert_eq!(dropped_name(&file), "scan.png");
    }

    #[test]
    fn test_dropped_name_prefers_given_name() {
        let file = egui::DroppedFile {
            name: "upload.jpg".to_string(),
            ..Default::default()
        };
        assert_eq!(dropped_name(&file), "upload.jpg");
    }
}

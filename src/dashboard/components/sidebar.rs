//! Sidebar with the file, run and export controls

use egui::{RichText, Rounding};
use crate::dashboard::components::{CardStatus, StatusCard};
use crate::dashboard::state::{DashboardState, ExportKind, NoticeLevel};
use crate::dashboard::theme::ThemeColors;
use crate::shared::{Session, SessionPhase};
use crate::vision::loader::SUPPORTED_EXTENSIONS;

/// Render the sidebar; buttons only record pending actions in `state`
pub fn render_sidebar(
    ui: &mut egui::Ui,
    state: &mut DashboardState,
    session: &Session,
    engine_status: &Result<String, String>,
) {
    ui.vertical(|ui| {
        ui.add_space(12.0);
        ui.label(
            RichText::new("TextLens")
                .size(22.0)
                .color(ThemeColors::ACCENT_PRIMARY)
                .strong()
        );
        ui.label(
            RichText::new("Offline text OCR")
                .size(11.0)
                .color(ThemeColors::TEXT_MUTED)
        );

        ui.add_space(12.0);
        ui.separator();
        ui.add_space(8.0);

        render_open_controls(ui, state);

        ui.add_space(12.0);

        let run_button = egui::Button::new(RichText::new("Run OCR").strong())
            .min_size(egui::vec2(ui.available_width(), 32.0));
        if ui.add_enabled(can_run(session), run_button).clicked() {
            state.pending_run = true;
        }

        if session.phase() == SessionPhase::Processing {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Processing image...");
            });
        }

        ui.add_space(12.0);
        render_export_controls(ui, state, session);

        ui.add_space(12.0);
        ui.separator();
        ui.add_space(8.0);

        render_status(ui, session, engine_status);

        if let Some(notice) = &state.notice {
            ui.add_space(8.0);
            let color = match notice.level {
                NoticeLevel::Info => ThemeColors::TEXT_SECONDARY,
                NoticeLevel::Error => ThemeColors::ACCENT_ERROR,
            };
            ui.label(RichText::new(&notice.message).size(12.0).color(color));
        }
    });
}

/// Whether "Run OCR" is enabled
///
/// Engine availability is not checked here; a missing engine surfaces as a
/// failed run, so installing it later needs no restart.
pub fn can_run(session: &Session) -> bool {
    matches!(session.phase(), SessionPhase::Loaded | SessionPhase::Displayed)
}

/// Path field, open button and drop hint
fn render_open_controls(ui: &mut egui::Ui, state: &mut DashboardState) {
    ui.label(RichText::new("Image").size(13.0).color(ThemeColors::TEXT_SECONDARY));

    let response = ui.add(
        egui::TextEdit::singleline(&mut state.path_input)
            .hint_text("/path/to/image.png")
            .desired_width(f32::INFINITY),
    );
    let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

    if ui.button("Open").clicked() || submitted {
        state.pending_open = true;
    }

    ui.label(
        RichText::new(format!("or drop a file ({})", SUPPORTED_EXTENSIONS.join(", ")))
            .size(11.0)
            .color(ThemeColors::TEXT_MUTED)
    );
}

/// Copy/save buttons for the text and JSON exports
fn render_export_controls(ui: &mut egui::Ui, state: &mut DashboardState, session: &Session) {
    let has_results = session.run().is_some();

    egui::Frame::none()
        .fill(ThemeColors::BG_MEDIUM)
        .rounding(Rounding::same(6.0))
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.label(RichText::new("Export").size(13.0).color(ThemeColors::TEXT_SECONDARY));

            for kind in [ExportKind::Text, ExportKind::Json] {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(kind.label()).size(12.0));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.add_enabled(has_results, egui::Button::new("Save")).clicked() {
                            state.pending_save = Some(kind);
                        }
                        if ui.add_enabled(has_results, egui::Button::new("Copy")).clicked() {
                            state.pending_copy = Some(kind);
                        }
                    });
                });
            }
        });
}

/// Engine, session and result cards
fn render_status(ui: &mut egui::Ui, session: &Session, engine_status: &Result<String, String>) {
    let engine_card = match engine_status {
        Ok(version) => StatusCard::new("Engine", version.clone(), CardStatus::Ready),
        Err(e) => StatusCard::new("Engine", e.clone(), CardStatus::Error),
    };
    engine_card.show(ui);
    ui.add_space(4.0);

    let file = session
        .source()
        .map(|s| s.name.clone())
        .unwrap_or_else(|| "No image".to_string());
    StatusCard::new(session.phase().name(), file, CardStatus::for_phase(session.phase())).show(ui);
    ui.add_space(4.0);

    if let Some(run) = session.run() {
        StatusCard::new(
            "Words",
            format!("{} in {} ms", run.detections.len(), run.processing_time_ms),
            CardStatus::Ready,
        )
        .show(ui);
    }

    if let Some(error) = session.last_error() {
        ui.add_space(4.0);
        StatusCard::new("Last error", error, CardStatus::Error).show(ui);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_run_needs_an_image() {
        assert!(!can_run(&Session::new()));
    }

    #[test]
    fn test_run_enabled_once_loaded() {
        let mut session = Session::new();
        session.set_image("scan.png", RgbImage::from_pixel(4, 4, Rgb([255, 255, 255])));
        assert!(can_run(&session));
    }

    #[test]
    fn test_run_disabled_while_processing() {
        let mut session = Session::new();
        session.set_image("scan.png", RgbImage::from_pixel(4, 4, Rgb([255, 255, 255])));
        session.begin_ocr().unwrap();
        assert!(!can_run(&session));
    }
}

//! Results view - original, preprocessed and annotated images plus text and JSON

use egui::RichText;

use crate::dashboard::state::DashboardState;
use crate::dashboard::theme::ThemeColors;
use crate::shared::{Session, SessionPhase};

/// Height of the recognized-text area
const TEXT_AREA_HEIGHT: f32 = 200.0;

/// Render the main results column
pub fn render_results_view(ui: &mut egui::Ui, state: &mut DashboardState, session: &Session) {
    ui.heading(RichText::new("Text OCR").size(24.0).strong());
    ui.add_space(8.0);

    if session.phase() == SessionPhase::Idle {
        render_placeholder(ui, "Open or drop an image to begin");
        return;
    }

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            section(ui, "Original Image");
            show_texture(ui, state.textures.original.as_ref());

            let Some(run) = session.run() else {
                ui.add_space(12.0);
                let hint = if session.phase() == SessionPhase::Processing {
                    "Processing image..."
                } else {
                    "Press \"Run OCR\" to recognize text"
                };
                ui.label(RichText::new(hint).color(ThemeColors::TEXT_MUTED));
                return;
            };

            section(ui, "Preprocessed Image");
            ui.checkbox(&mut state.show_preprocessed, "Show");
            if state.show_preprocessed {
                show_texture(ui, state.textures.preprocessed.as_ref());
            }

            section(ui, "Annotated Output");
            show_texture(ui, state.textures.annotated.as_ref());

            section(ui, "Extracted Text");
            let mut text = run.text.as_str();
            egui::ScrollArea::vertical()
                .id_salt("ocr_text")
                .max_height(TEXT_AREA_HEIGHT)
                .show(ui, |ui| {
                    ui.add(
                        egui::TextEdit::multiline(&mut text)
                            .font(egui::TextStyle::Monospace)
                            .desired_width(f32::INFINITY),
                    );
                });

            section(ui, "Detected Words (JSON)");
            ui.checkbox(&mut state.show_json, "Show");
            if state.show_json {
                match &state.textures.json {
                    Some(Ok(json)) => {
                        egui::Frame::none()
                            .fill(ThemeColors::BG_MEDIUM)
                            .rounding(egui::Rounding::same(4.0))
                            .inner_margin(8.0)
                            .show(ui, |ui| {
                                ui.set_min_width(ui.available_width());
                                ui.label(RichText::new(json.as_str()).monospace().size(13.0));
                            });
                    }
                    Some(Err(e)) => {
                        ui.label(RichText::new(e.as_str()).color(ThemeColors::ACCENT_ERROR));
                    }
                    None => {}
                }
            }
        });
}

fn section(ui: &mut egui::Ui, title: &str) {
    ui.add_space(12.0);
    ui.label(RichText::new(title).size(17.0).strong());
    ui.add_space(4.0);
}

/// Draw a texture scaled to the column width, keeping its aspect ratio
fn show_texture(ui: &mut egui::Ui, texture: Option<&egui::TextureHandle>) {
    let Some(texture) = texture else {
        render_placeholder(ui, "No image");
        return;
    };

    let tex_size = texture.size_vec2();
    let scale = (ui.available_width() / tex_size.x).min(1.0);
    let size = tex_size * scale;

    let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
    ui.painter().image(
        texture.id(),
        rect,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );
}

fn render_placeholder(ui: &mut egui::Ui, message: &str) {
    egui::Frame::none()
        .fill(ThemeColors::BG_MEDIUM)
        .rounding(egui::Rounding::same(6.0))
        .inner_margin(24.0)
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.vertical_centered(|ui| {
                ui.label(RichText::new(message).size(15.0).color(ThemeColors::TEXT_MUTED));
            });
        });
}

//! Dashboard theme and styling
//!
//! Dark slate theme; the annotation green doubles as the accent color so the
//! controls match the boxes drawn on the image.

use egui::{Color32, FontFamily, FontId, Rounding, Stroke, TextStyle, Visuals};

/// Color palette
pub struct ThemeColors;

impl ThemeColors {
    // Background colors
    pub const BG_DARK: Color32 = Color32::from_rgb(20, 22, 26);
    pub const BG_MEDIUM: Color32 = Color32::from_rgb(30, 33, 39);
    pub const BG_LIGHT: Color32 = Color32::from_rgb(42, 46, 54);
    pub const BG_HOVER: Color32 = Color32::from_rgb(54, 59, 69);

    // Accent colors
    pub const ACCENT_PRIMARY: Color32 = Color32::from_rgb(0, 200, 90);
    pub const ACCENT_WARNING: Color32 = Color32::from_rgb(255, 193, 7);
    pub const ACCENT_ERROR: Color32 = Color32::from_rgb(231, 76, 60);

    // Text colors
    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(236, 238, 242);
    pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(160, 166, 178);
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(105, 112, 125);

    pub const BORDER: Color32 = Color32::from_rgb(56, 61, 72);

    // Status colors
    pub const STATUS_READY: Color32 = Color32::from_rgb(0, 200, 90);
    pub const STATUS_IDLE: Color32 = Color32::from_rgb(160, 166, 178);
    pub const STATUS_ERROR: Color32 = Color32::from_rgb(231, 76, 60);
}

/// Apply the theme to egui
pub fn apply_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();
    let mut visuals = Visuals::dark();

    visuals.window_fill = ThemeColors::BG_MEDIUM;
    visuals.panel_fill = ThemeColors::BG_DARK;
    visuals.faint_bg_color = ThemeColors::BG_LIGHT;
    visuals.extreme_bg_color = ThemeColors::BG_DARK;

    for (widget, fill) in [
        (&mut visuals.widgets.noninteractive, ThemeColors::BG_MEDIUM),
        (&mut visuals.widgets.inactive, ThemeColors::BG_LIGHT),
        (&mut visuals.widgets.hovered, ThemeColors::BG_HOVER),
        (&mut visuals.widgets.open, ThemeColors::BG_HOVER),
    ] {
        widget.bg_fill = fill;
        widget.fg_stroke = Stroke::new(1.0, ThemeColors::TEXT_PRIMARY);
        widget.rounding = Rounding::same(4.0);
    }
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, ThemeColors::TEXT_SECONDARY);

    visuals.widgets.active.bg_fill = ThemeColors::ACCENT_PRIMARY;
    visuals.widgets.active.fg_stroke = Stroke::new(1.0, ThemeColors::BG_DARK);
    visuals.widgets.active.rounding = Rounding::same(4.0);

    visuals.selection.bg_fill = color_with_alpha(ThemeColors::ACCENT_PRIMARY, 77);
    visuals.selection.stroke = Stroke::new(1.0, ThemeColors::ACCENT_PRIMARY);
    visuals.hyperlink_color = ThemeColors::ACCENT_PRIMARY;
    visuals.window_stroke = Stroke::new(1.0, ThemeColors::BORDER);

    style.visuals = visuals;

    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(10.0, 5.0);

    style.text_styles = [
        (TextStyle::Small, FontId::new(12.0, FontFamily::Proportional)),
        (TextStyle::Body, FontId::new(15.0, FontFamily::Proportional)),
        (TextStyle::Monospace, FontId::new(14.0, FontFamily::Monospace)),
        (TextStyle::Button, FontId::new(15.0, FontFamily::Proportional)),
        (TextStyle::Heading, FontId::new(21.0, FontFamily::Proportional)),
    ]
    .into();

    ctx.set_style(style);
}

/// Helper to create a color with modified alpha
pub fn color_with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

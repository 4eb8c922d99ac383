//! Status card component for displaying status information

use egui::{Color32, RichText, Rounding, Vec2};
use crate::dashboard::theme::ThemeColors;
use crate::shared::SessionPhase;

/// A card displaying one status value
pub struct StatusCard {
    pub title: String,
    pub value: String,
    pub status: CardStatus,
}

/// Status types for cards
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CardStatus {
    Ready,
    Idle,
    Busy,
    Error,
}

impl CardStatus {
    pub fn color(&self) -> Color32 {
        match self {
            CardStatus::Ready => ThemeColors::STATUS_READY,
            CardStatus::Idle => ThemeColors::STATUS_IDLE,
            CardStatus::Busy => ThemeColors::ACCENT_WARNING,
            CardStatus::Error => ThemeColors::STATUS_ERROR,
        }
    }

    /// Card status for a session phase
    pub fn for_phase(phase: SessionPhase) -> Self {
        match phase {
            SessionPhase::Idle => CardStatus::Idle,
            SessionPhase::Loaded => CardStatus::Idle,
            SessionPhase::Processing => CardStatus::Busy,
            SessionPhase::Displayed => CardStatus::Ready,
        }
    }
}

impl StatusCard {
    pub fn new(title: impl Into<String>, value: impl Into<String>, status: CardStatus) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            status,
        }
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        egui::Frame::none()
            .fill(ThemeColors::BG_MEDIUM)
            .rounding(Rounding::same(6.0))
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());

                ui.horizontal(|ui| {
                    // Status indicator dot
                    let center = ui.cursor().left_top() + Vec2::new(4.0, 9.0);
                    ui.painter().circle_filled(center, 4.0, self.status.color());
                    ui.add_space(14.0);

                    ui.vertical(|ui| {
                        ui.label(
                            RichText::new(&self.title)
                                .size(11.0)
                                .color(ThemeColors::TEXT_MUTED)
                        );
                        ui.label(
                            RichText::new(&self.value)
                                .size(14.0)
                                .color(ThemeColors::TEXT_PRIMARY)
                                .strong()
                        );
                    });
                });
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_colors() {
        assert_eq!(CardStatus::for_phase(SessionPhase::Displayed), CardStatus::Ready);
        assert_eq!(CardStatus::for_phase(SessionPhase::Processing), CardStatus::Busy);
        assert_eq!(CardStatus::for_phase(SessionPhase::Idle).color(), ThemeColors::STATUS_IDLE);
    }
}

use eframe::egui::{self, Color32};
use shared::domain::{ContactStatus, DealStage};

pub struct Badge {
    pub fill: Color32,
    pub text: Color32,
}

/// Status pill colours: pale fill with dark text, inverted in dark mode.
pub fn status_badge(status: ContactStatus, dark: bool) -> Badge {
    let (light_fill, strong, dark_fill, pale) = match status {
        ContactStatus::Lead => (
            Color32::from_rgb(219, 234, 254),
            Color32::from_rgb(29, 78, 216),
            Color32::from_rgb(30, 58, 138),
            Color32::from_rgb(147, 197, 253),
        ),
        ContactStatus::Prospect => (
            Color32::from_rgb(243, 232, 255),
            Color32::from_rgb(126, 34, 206),
            Color32::from_rgb(88, 28, 135),
            Color32::from_rgb(216, 180, 254),
        ),
        ContactStatus::Customer => (
            Color32::from_rgb(220, 252, 231),
            Color32::from_rgb(21, 128, 61),
            Color32::from_rgb(20, 83, 45),
            Color32::from_rgb(134, 239, 172),
        ),
        ContactStatus::Churned => (
            Color32::from_rgb(254, 226, 226),
            Color32::from_rgb(185, 28, 28),
            Color32::from_rgb(127, 29, 29),
            Color32::from_rgb(252, 165, 165),
        ),
    };
    if dark {
        Badge {
            fill: dark_fill,
            text: pale,
        }
    } else {
        Badge {
            fill: light_fill,
            text: strong,
        }
    }
}

pub fn stage_accent(stage: DealStage) -> Color32 {
    match stage {
        DealStage::Discovery => Color32::from_rgb(59, 130, 246),
        DealStage::Qualification => Color32::from_rgb(168, 85, 247),
        DealStage::Proposal => Color32::from_rgb(234, 179, 8),
        DealStage::Negotiation => Color32::from_rgb(249, 115, 22),
        DealStage::Won => Color32::from_rgb(34, 197, 94),
        DealStage::Lost => Color32::from_rgb(239, 68, 68),
    }
}

pub fn visuals(dark: bool) -> egui::Visuals {
    let mut visuals = if dark {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    };
    if dark {
        visuals.panel_fill = Color32::from_rgb(17, 24, 39);
        visuals.window_fill = Color32::from_rgb(31, 41, 55);
        visuals.extreme_bg_color = Color32::from_rgb(31, 41, 55);
    } else {
        visuals.panel_fill = Color32::from_rgb(243, 244, 246);
        visuals.window_fill = Color32::WHITE;
        visuals.extreme_bg_color = Color32::WHITE;
    }
    visuals
}

pub fn badge(ui: &mut egui::Ui, label: &str, badge: Badge) {
    egui::Frame::NONE
        .fill(badge.fill)
        .corner_radius(8.0)
        .inner_margin(egui::Margin::symmetric(8, 2))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(label).small().color(badge.text));
        });
}

//! Deal pipeline board, one column per stage.

use client_core::{
    presentation::{format_currency, format_date},
    DealPipeline,
};
use eframe::egui;

use crate::ui::theme;

pub fn show(ui: &mut egui::Ui, pipeline: &DealPipeline, loaded: bool) {
    ui.heading("Deals");
    if !loaded {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Loading deals...");
        });
        return;
    }
    ui.label(format!(
        "Pipeline value {} ({} open)",
        format_currency(pipeline.total_value()),
        format_currency(pipeline.open_value())
    ));
    ui.separator();

    let stages = pipeline.stages();
    egui::ScrollArea::vertical().show(ui, |ui| {
        ui.columns(stages.len(), |columns| {
            for (ui, summary) in columns.iter_mut().zip(&stages) {
                ui.label(
                    egui::RichText::new(summary.stage.label())
                        .strong()
                        .color(theme::stage_accent(summary.stage)),
                );
                ui.small(format!(
                    "{} deals, {}",
                    summary.count(),
                    format_currency(summary.total_value)
                ));
                for deal in &summary.deals {
                    egui::Frame::group(ui.style()).show(ui, |ui| {
                        ui.label(egui::RichText::new(deal.title.as_str()).strong());
                        ui.small(format!("{} / {}", deal.contact_name, deal.company));
                        ui.label(format_currency(deal.value));
                        ui.small(format!(
                            "{}% by {}",
                            deal.probability,
                            format_date(&deal.expected_close_date)
                        ));
                    });
                }
            }
        });
    });
}

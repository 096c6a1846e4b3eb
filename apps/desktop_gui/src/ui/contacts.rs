//! Contact list page: browse, add form and detail panel.

use client_core::{
    presentation::{format_currency, format_date, initials, status_label},
    ContactField, ContactListController, ControllerError, DealPipeline, StatusFilter, ViewMode,
};
use eframe::egui;
use shared::domain::{ContactId, ContactStatus};

use crate::controller::toasts::ToastSender;
use crate::ui::theme;

type Controller = ContactListController<ToastSender>;

enum ListAction {
    Add,
    Select(ContactId),
    Delete(ContactId),
}

pub fn show(ui: &mut egui::Ui, controller: &mut Controller, pipeline: &DealPipeline, dark: bool) {
    match controller.mode() {
        ViewMode::Loading => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Loading contacts...");
            });
        }
        ViewMode::Browsing => browse(ui, controller, dark),
        ViewMode::Adding => add_form(ui, controller),
        ViewMode::Viewing(_) => detail(ui, controller, pipeline, dark),
    }
}

fn filter_label(filter: StatusFilter) -> &'static str {
    match filter {
        StatusFilter::All => "All Statuses",
        StatusFilter::Only(status) => status_label(status),
    }
}

fn log_rejected<T>(result: Result<T, ControllerError>) {
    if let Err(err) = result {
        tracing::warn!("contact action rejected: {err}");
    }
}

fn browse(ui: &mut egui::Ui, controller: &mut Controller, dark: bool) {
    let mut action = None;

    ui.horizontal(|ui| {
        ui.heading("Contacts");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Add Contact").clicked() {
                action = Some(ListAction::Add);
            }
        });
    });

    let mut term = controller.criteria().search_term.clone();
    let mut status = controller.criteria().status;
    ui.horizontal(|ui| {
        let search = egui::TextEdit::singleline(&mut term)
            .id_salt("contact_search")
            .hint_text("Search contacts...")
            .desired_width(260.0);
        if ui.add(search).changed() {
            controller.set_search_term(term.clone());
        }
        egui::ComboBox::from_id_salt("status_filter")
            .selected_text(filter_label(status))
            .show_ui(ui, |ui| {
                for choice in StatusFilter::choices() {
                    ui.selectable_value(&mut status, choice, filter_label(choice));
                }
            });
    });
    if status != controller.criteria().status {
        controller.set_status_filter(status);
    }
    ui.separator();

    let visible = controller.filtered_contacts();
    if visible.is_empty() {
        ui.label(egui::RichText::new("No contacts found").weak());
    }
    egui::ScrollArea::vertical().show(ui, |ui| {
        for contact in &visible {
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(initials(contact)).strong().size(18.0));
                    ui.vertical(|ui| {
                        ui.label(egui::RichText::new(contact.full_name()).strong());
                        ui.small(contact.email.as_str());
                    });
                    ui.add_space(12.0);
                    ui.label(contact.company.as_str());
                    theme::badge(
                        ui,
                        status_label(contact.status),
                        theme::status_badge(contact.status, dark),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("Delete").clicked() {
                            action = Some(ListAction::Delete(contact.id));
                        }
                        if ui.small_button("View").clicked() {
                            action = Some(ListAction::Select(contact.id));
                        }
                    });
                });
            });
        }
    });

    match action {
        Some(ListAction::Add) => log_rejected(controller.begin_add()),
        Some(ListAction::Select(id)) => log_rejected(controller.select(id)),
        Some(ListAction::Delete(id)) => log_rejected(controller.delete(id)),
        None => {}
    }
}

fn add_form(ui: &mut egui::Ui, controller: &mut Controller) {
    let mut submit = false;
    let mut cancel = false;

    ui.heading("Add New Contact");
    ui.add_space(8.0);
    egui::Grid::new("contact_form")
        .num_columns(2)
        .spacing([12.0, 8.0])
        .show(ui, |ui| {
            for field in ContactField::ALL {
                ui.label(field.label());
                let mut value = controller.form().value(field).to_string();
                ui.vertical(|ui| {
                    let edit = egui::TextEdit::singleline(&mut value)
                        .id_salt(field.key())
                        .hint_text(field.placeholder())
                        .desired_width(280.0);
                    if ui.add(edit).changed() {
                        controller.update_field(field, value.clone());
                    }
                    if let Some(err) = controller.validation_errors().get(field) {
                        let color = ui.visuals().error_fg_color;
                        ui.colored_label(color, err.to_string());
                    }
                });
                ui.end_row();
            }

            ui.label("Status");
            let mut status = controller.form().status;
            egui::ComboBox::from_id_salt("draft_status")
                .selected_text(status_label(status))
                .show_ui(ui, |ui| {
                    for choice in ContactStatus::ALL {
                        ui.selectable_value(&mut status, choice, status_label(choice));
                    }
                });
            if status != controller.form().status {
                controller.update_status(status);
            }
            ui.end_row();
        });

    ui.add_space(8.0);
    ui.horizontal(|ui| {
        cancel = ui.button("Cancel").clicked();
        submit = ui.button("Add Contact").clicked();
    });

    if cancel {
        log_rejected(controller.cancel_add());
    } else if submit {
        match controller.submit() {
            // Field errors are already on screen and toasted.
            Ok(_) | Err(ControllerError::Validation(_)) => {}
            Err(err) => tracing::warn!("submit rejected: {err}"),
        }
    }
}

fn detail(ui: &mut egui::Ui, controller: &mut Controller, pipeline: &DealPipeline, dark: bool) {
    let Some(contact) = controller.selected_contact().cloned() else {
        log_rejected(controller.back());
        return;
    };
    let mut back = false;
    let mut delete = false;

    ui.horizontal(|ui| {
        back = ui.button("Back to list").clicked();
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            delete = ui.button("Delete").clicked();
        });
    });
    ui.separator();

    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(initials(&contact)).strong().size(28.0));
        ui.vertical(|ui| {
            ui.heading(contact.full_name());
            theme::badge(
                ui,
                status_label(contact.status),
                theme::status_badge(contact.status, dark),
            );
        });
    });
    ui.add_space(8.0);

    egui::Grid::new("contact_detail")
        .num_columns(2)
        .spacing([16.0, 6.0])
        .show(ui, |ui| {
            for (label, value) in [
                ("Email", contact.email.clone()),
                ("Phone", contact.phone.clone()),
                ("Company", contact.company.clone()),
                ("Added", format_date(&contact.created_at)),
            ] {
                ui.label(egui::RichText::new(label).weak());
                ui.label(value);
                ui.end_row();
            }
            if let Some(notes) = &contact.notes {
                ui.label(egui::RichText::new("Notes").weak());
                ui.label(notes.as_str());
                ui.end_row();
            }
        });

    let deals = pipeline.deals_for_contact(contact.id);
    if !deals.is_empty() {
        ui.add_space(12.0);
        ui.label(egui::RichText::new("Deals").strong());
        for deal in deals {
            ui.horizontal(|ui| {
                ui.colored_label(theme::stage_accent(deal.stage), deal.stage.label());
                ui.label(deal.title.as_str());
                ui.label(format_currency(deal.value));
            });
        }
    }

    if delete {
        log_rejected(controller.delete(contact.id));
    } else if back {
        log_rejected(controller.back());
    }
}

//! App shell: side navigation, route pages, banner, footer and toasts.

use std::time::{Duration, Instant};

use chrono::{Datelike, Utc};
use client_core::{
    presentation::{format_currency, status_label},
    shell::{footer_text, APP_NAME, NOT_FOUND_HEADING, NOT_FOUND_MESSAGE},
    ContactListController, DealPipeline, NavigationShell, NotificationKind, Route,
};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::{Contact, ContactStatus};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::{UiError, UiErrorContext, UiEvent},
    loads::PendingLoads,
    orchestration::dispatch_backend_command,
    toasts::{ToastQueue, ToastSender},
};
use crate::ui::{contacts, deals, theme};

pub struct DesktopGuiApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    controller: ContactListController<ToastSender>,
    toasts: ToastQueue,
    shell: NavigationShell,
    pipeline: DealPipeline,
    loads: PendingLoads,
    status_banner: Option<UiError>,
    route_draft: String,
    applied_dark: Option<bool>,
}

impl DesktopGuiApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        shell: NavigationShell,
    ) -> Self {
        let (toast_tx, toasts) = ToastQueue::new();
        let mut app = Self {
            cmd_tx,
            ui_rx,
            controller: ContactListController::new(toast_tx),
            toasts,
            shell,
            pipeline: DealPipeline::default(),
            loads: PendingLoads::default(),
            status_banner: None,
            route_draft: String::new(),
            applied_dark: None,
        };
        app.request_missing_data();
        app
    }

    /// Sends each load that is neither queued nor finished.
    fn request_missing_data(&mut self) {
        for cmd in self.loads.take_missing() {
            if let Err(err) = dispatch_backend_command(&self.cmd_tx, cmd) {
                self.loads.failed(cmd);
                self.status_banner = Some(err);
            }
        }
    }

    fn deals_loaded(&self) -> bool {
        self.loads.is_done(BackendCommand::LoadDeals)
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::ContactsLoaded(contacts) => {
                    self.loads.completed(BackendCommand::LoadContacts);
                    if let Err(err) = self.controller.finish_loading(contacts) {
                        tracing::warn!("ignoring contact load: {err}");
                    }
                }
                UiEvent::DealsLoaded(deals) => {
                    tracing::info!(count = deals.len(), "deals loaded");
                    self.pipeline = DealPipeline::new(deals);
                    self.loads.completed(BackendCommand::LoadDeals);
                }
                UiEvent::LoadFailed { command, error } => {
                    tracing::warn!(command = command.name(), "{error}");
                    self.loads.failed(command);
                    self.status_banner = Some(error);
                }
                UiEvent::Error(err) => {
                    tracing::warn!("{err}");
                    self.status_banner = Some(err);
                }
            }
        }
    }

    fn apply_theme_if_needed(&mut self, ctx: &egui::Context) {
        let dark = self.shell.theme().is_dark();
        if self.applied_dark == Some(dark) {
            return;
        }
        let mut style = (*ctx.style()).clone();
        style.visuals = theme::visuals(dark);
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        style.spacing.button_padding = egui::vec2(10.0, 6.0);
        ctx.set_style(style);
        self.applied_dark = Some(dark);
    }

    fn toggle_theme(&mut self) {
        if let Err(err) = self.shell.theme_mut().toggle() {
            self.status_banner = Some(UiError::new(
                UiErrorContext::Preferences,
                format!("{err:#}"),
            ));
        }
    }

    fn navigate(&mut self, path: &str) {
        let route = self.shell.navigate(path);
        tracing::debug!(%route, "navigated");
    }

    fn show_status_banner(&mut self, ctx: &egui::Context) {
        let Some(banner) = self.status_banner.clone() else {
            return;
        };
        let mut dismiss = false;
        let mut retry = false;
        egui::TopBottomPanel::top("status_banner").show(ctx, |ui| {
            egui::Frame::NONE
                .fill(egui::Color32::from_rgb(185, 28, 28))
                .corner_radius(8.0)
                .inner_margin(egui::Margin::symmetric(10, 8))
                .show(ui, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        ui.label(egui::RichText::new(banner.to_string()).color(egui::Color32::WHITE));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            dismiss = ui.button("Dismiss").clicked();
                            if banner.is_retryable() {
                                retry = ui.button("Retry").clicked();
                            }
                        });
                    });
                });
        });
        if dismiss || retry {
            self.status_banner = None;
        }
        if retry {
            self.request_missing_data();
        }
    }

    fn show_navigation(&mut self, ctx: &egui::Context) {
        let mut target: Option<String> = None;
        let mut toggle = false;
        let dark = self.shell.theme().is_dark();

        egui::SidePanel::left("navigation")
            .resizable(false)
            .default_width(200.0)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                ui.heading(APP_NAME);
                ui.add_space(12.0);
                for item in self.shell.nav_items() {
                    let button = egui::Button::new(item.label).selected(self.shell.is_active(item));
                    if ui.add_sized([ui.available_width(), 28.0], button).clicked() {
                        target = Some(item.path.to_string());
                    }
                }

                ui.with_layout(egui::Layout::bottom_up(egui::Align::Min), |ui| {
                    ui.add_space(8.0);
                    let label = if dark { "Light mode" } else { "Dark mode" };
                    toggle = ui.button(label).clicked();
                    ui.separator();
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut self.route_draft)
                            .id_salt("route_entry")
                            .hint_text("/path")
                            .desired_width(f32::INFINITY),
                    );
                    if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        target = Some(std::mem::take(&mut self.route_draft));
                    }
                    ui.small("Go to path");
                });
            });

        if toggle {
            self.toggle_theme();
        }
        if let Some(path) = target {
            self.navigate(&path);
        }
    }

    fn show_footer(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.small(footer_text(Utc::now().year()));
            });
        });
    }

    fn show_dashboard_summary(&self, ui: &mut egui::Ui) {
        ui.heading("Dashboard");
        if self.controller.is_loading() {
            return;
        }
        ui.horizontal_wrapped(|ui| {
            ui.label(format!("{} contacts", self.controller.contacts().len()));
            for (status, count) in status_counts(self.controller.contacts()) {
                ui.separator();
                ui.label(format!("{} {count}", status_label(status)));
            }
            if self.deals_loaded() {
                ui.separator();
                ui.label(format!(
                    "Open pipeline {}",
                    format_currency(self.pipeline.open_value())
                ));
            }
        });
        ui.add_space(12.0);
    }

    fn show_page(&mut self, ctx: &egui::Context) {
        let dark = self.shell.theme().is_dark();
        let route = self.shell.route().clone();
        let mut go_home = false;

        egui::CentralPanel::default().show(ctx, |ui| match &route {
            Route::Dashboard => {
                self.show_dashboard_summary(ui);
                contacts::show(ui, &mut self.controller, &self.pipeline, dark);
            }
            Route::Contacts => contacts::show(ui, &mut self.controller, &self.pipeline, dark),
            Route::Deals => deals::show(ui, &self.pipeline, self.deals_loaded()),
            Route::NotFound(path) => {
                ui.vertical_centered(|ui| {
                    ui.add_space(60.0);
                    ui.label(egui::RichText::new("404").size(56.0).strong());
                    ui.heading(NOT_FOUND_HEADING);
                    ui.small(path.as_str());
                    ui.label(NOT_FOUND_MESSAGE);
                    ui.add_space(12.0);
                    go_home = ui.button("Return to Dashboard").clicked();
                });
            }
        });

        if go_home {
            self.navigate("/");
        }
    }

    fn show_toasts(&mut self, ctx: &egui::Context) {
        let mut dismissed = None;
        egui::Area::new(egui::Id::new("toasts"))
            .order(egui::Order::Foreground)
            .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-16.0, 16.0))
            .show(ctx, |ui| {
                for (index, toast) in self.toasts.active().iter().enumerate() {
                    let fill = match toast.notification.kind {
                        NotificationKind::Success => egui::Color32::from_rgb(21, 128, 61),
                        NotificationKind::Error => egui::Color32::from_rgb(185, 28, 28),
                        NotificationKind::Info => egui::Color32::from_rgb(55, 65, 81),
                    };
                    let response = egui::Frame::NONE
                        .fill(fill)
                        .corner_radius(8.0)
                        .inner_margin(egui::Margin::symmetric(12, 8))
                        .show(ui, |ui| {
                            ui.label(
                                egui::RichText::new(toast.notification.message.as_str())
                                    .color(egui::Color32::WHITE),
                            );
                        })
                        .response
                        .interact(egui::Sense::click());
                    if response.clicked() {
                        dismissed = Some(index);
                    }
                    ui.add_space(6.0);
                }
            });
        if let Some(index) = dismissed {
            self.toasts.dismiss(index);
        }
    }
}

/// Contact count per status, in status order.
fn status_counts(contacts: &[Contact]) -> Vec<(ContactStatus, usize)> {
    ContactStatus::ALL
        .into_iter()
        .map(|status| {
            let count = contacts.iter().filter(|c| c.status == status).count();
            (status, count)
        })
        .collect()
}

impl eframe::App for DesktopGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.apply_theme_if_needed(ctx);

        self.show_status_banner(ctx);
        self.show_navigation(ctx);
        self.show_footer(ctx);
        self.show_page(ctx);

        self.toasts.pump(Instant::now());
        self.show_toasts(ctx);

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::fixtures;

    #[test]
    fn status_counts_cover_every_status() {
        let contacts = fixtures::seed_contacts().expect("seed");
        let counts = status_counts(&contacts);
        assert_eq!(
            counts,
            [
                (ContactStatus::Lead, 2),
                (ContactStatus::Prospect, 2),
                (ContactStatus::Customer, 2),
                (ContactStatus::Churned, 1),
            ]
        );
        assert!(status_counts(&[]).iter().all(|(_, count)| *count == 0));
    }
}

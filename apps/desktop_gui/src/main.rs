mod backend_bridge;
mod controller;
mod ui;

use std::path::PathBuf;

use clap::Parser;
use client_core::{shell::APP_NAME, NavigationShell, ThemeState};
use crossbeam_channel::bounded;
use eframe::egui;

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;
use ui::DesktopGuiApp;

#[derive(Parser, Debug)]
#[command(name = "relatehub-gui", about = "RelateHub desktop client")]
struct Args {
    /// Simulated fixture latency in milliseconds.
    #[arg(long)]
    latency_ms: Option<u64>,
    /// Where the dark-mode preference is stored.
    #[arg(long)]
    preferences: Option<PathBuf>,
    /// Start dark even if the platform theme is light.
    #[arg(long)]
    dark: bool,
}

fn main() -> eframe::Result<()> {
    let args = Args::parse();
    let mut settings = client_core::load_settings();
    if let Some(ms) = args.latency_ms {
        settings.fixture_latency_ms = ms;
    }
    if let Some(path) = args.preferences {
        settings.preferences_path = Some(path);
    }
    tracing_subscriber::fmt()
        .with_env_filter(settings.log_filter.as_str())
        .init();

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, settings.fixture_latency());

    let store = settings.preference_store();
    let force_dark = args.dark;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_NAME)
            .with_inner_size([1200.0, 780.0])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |cc| {
            // egui starts out following the platform theme.
            let system_dark = force_dark || cc.egui_ctx.style().visuals.dark_mode;
            let shell = NavigationShell::new(ThemeState::load(store, system_dark));
            Ok(Box::new(DesktopGuiApp::new(cmd_tx, ui_rx, shell)))
        }),
    )
}

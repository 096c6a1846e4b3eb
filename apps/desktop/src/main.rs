mod commands;
mod render;

use std::{io::Write, path::PathBuf};

use anyhow::Result;
use clap::Parser;
use client_core::{
    ContactListController, ControllerError, DealPipeline, NavigationShell, Notification, Notifier,
    ThemeState, TracingNotifier,
};
use commands::{Command, HELP};
use storage::{FixtureSource, MockFixtureSource};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::broadcast,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "relatehub", about = "RelateHub contact list in the terminal")]
struct Args {
    /// Simulated fixture latency in milliseconds.
    #[arg(long)]
    latency_ms: Option<u64>,
    /// Where the dark-mode preference is stored.
    #[arg(long)]
    preferences: Option<PathBuf>,
    #[arg(long, default_value = "/")]
    route: String,
    /// Treat the platform as preferring a dark theme.
    #[arg(long)]
    system_dark: bool,
    /// Send toasts to the log instead of printing them.
    #[arg(long)]
    log_toasts: bool,
}

enum Flow {
    Continue,
    Quit,
}

struct Session {
    shell: NavigationShell,
    controller: ContactListController<Box<dyn Notifier>>,
    pipeline: DealPipeline,
}

impl Session {
    fn execute(&mut self, command: Command) -> Result<Flow> {
        let controller = &mut self.controller;
        match command {
            Command::Go(path) => {
                self.shell.navigate(&path);
                self.render_page();
            }
            Command::Nav => render::nav(&self.shell),
            Command::Theme => {
                let dark = self.shell.theme_mut().toggle()?;
                println!("dark mode {}", if dark { "on" } else { "off" });
            }
            Command::List => render::list(controller),
            Command::Search(term) => {
                controller.set_search_term(term);
                render::list(controller);
            }
            Command::Filter(filter) => {
                controller.set_status_filter(filter);
                render::list(controller);
            }
            Command::Add => {
                controller.begin_add()?;
                render::form(controller);
            }
            Command::Set(field, value) => {
                controller.update_field(field, value);
                render::form(controller);
            }
            Command::Status(status) => {
                controller.update_status(status);
                render::form(controller);
            }
            Command::Submit => match controller.submit() {
                Ok(_) => render::list(controller),
                Err(ControllerError::Validation(_)) => render::form(controller),
                Err(err) => return Err(err.into()),
            },
            Command::Cancel => {
                controller.cancel_add()?;
                render::list(controller);
            }
            Command::Show(id) => {
                controller.select(id)?;
                render::contacts_view(controller, &self.pipeline);
            }
            Command::Back => {
                controller.back()?;
                render::list(controller);
            }
            Command::Delete(id) => {
                if !controller.delete(id)? {
                    println!("no contact with id {id}");
                }
                render::contacts_view(controller, &self.pipeline);
            }
            Command::Deals => render::deals(&self.pipeline),
            Command::Json => {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&controller.filtered_contacts())?
                );
            }
            Command::Help => println!("{HELP}"),
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn render_page(&self) {
        render::page(&self.shell, &self.controller, &self.pipeline);
    }
}

fn drain_toasts(toasts: Option<&mut broadcast::Receiver<Notification>>) {
    let Some(toasts) = toasts else {
        return;
    };
    while let Ok(toast) = toasts.try_recv() {
        println!("[{}] {}", toast.kind, toast.message);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = client_core::load_settings();
    if let Some(ms) = args.latency_ms {
        settings.fixture_latency_ms = ms;
    }
    if let Some(path) = args.preferences {
        settings.preferences_path = Some(path);
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&settings.log_filter))
        .with_writer(std::io::stderr)
        .init();

    let mut toasts = None;
    let notifier: Box<dyn Notifier> = if args.log_toasts {
        Box::new(TracingNotifier)
    } else {
        let (tx, rx) = broadcast::channel(64);
        toasts = Some(rx);
        Box::new(tx)
    };
    let theme = ThemeState::load(settings.preference_store(), args.system_dark);
    let mut session = Session {
        shell: NavigationShell::new(theme),
        controller: ContactListController::new(notifier),
        pipeline: DealPipeline::default(),
    };
    session.shell.navigate(&args.route);
    session.render_page();

    let source = MockFixtureSource::new(settings.fixture_latency());
    let loaded = session.controller.load_from(&source).await?;
    session.pipeline = DealPipeline::new(source.load_deals().await?);
    tracing::info!(
        contacts = loaded,
        deals = session.pipeline.deals().len(),
        "fixtures loaded"
    );
    session.render_page();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };
        let flow = session.execute(command);
        drain_toasts(toasts.as_mut());
        match flow {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(err) => println!("error: {err:#}"),
        }
    }

    Ok(())
}

//! Backend worker: owns the fixture source on its own tokio runtime and
//! answers UI commands with events.

use std::{thread, time::Duration};

use anyhow::Context as _;
use crossbeam_channel::{Receiver, Sender};
use storage::{FixtureSource, MockFixtureSource};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, latency: Duration) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::new(
                    UiErrorContext::BackendStartup,
                    format!("failed to build backend runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let source = MockFixtureSource::new(latency);
        tracing::info!(?latency, "backend worker ready");
        runtime.block_on(async move {
            while let Ok(cmd) = cmd_rx.recv() {
                let event = match handle(&source, cmd).await {
                    Ok(event) => event,
                    Err(err) => {
                        tracing::warn!(command = cmd.name(), "backend command failed: {err:#}");
                        UiEvent::LoadFailed {
                            command: cmd,
                            error: UiError::new(UiErrorContext::Fixtures, format!("{err:#}")),
                        }
                    }
                };
                if ui_tx.send(event).is_err() {
                    break;
                }
            }
            tracing::debug!("backend worker stopping");
        });
    });
}

async fn handle(source: &dyn FixtureSource, cmd: BackendCommand) -> anyhow::Result<UiEvent> {
    match cmd {
        BackendCommand::LoadContacts => {
            let contacts = source.load_contacts().await.context("loading contacts")?;
            Ok(UiEvent::ContactsLoaded(contacts))
        }
        BackendCommand::LoadDeals => {
            let deals = source.load_deals().await.context("loading deals")?;
            Ok(UiEvent::DealsLoaded(deals))
        }
    }
}

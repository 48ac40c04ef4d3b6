//! Live telemetry stream

use anyhow::Result;
use racedash_telemetry_config::ClientSettings;
use racedash_telemetry_poller::{
    HttpTelemetryApi, PollError, TelemetryPoller, TelemetryUpdate,
};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{info, trace};

use crate::commands::WatchArgs;
use crate::error::CliError;
use crate::output::{self, JsonLayout};

enum Event {
    Update(Box<TelemetryUpdate>),
    Failed(PollError),
}

/// Hand a poller event to the render loop; after the loop exits events are dropped.
fn forward(tx: &UnboundedSender<Event>, event: Event) {
    if tx.send(event).is_err() {
        trace!("Render loop closed; dropping telemetry event");
    }
}

/// Poll until interrupted, or until `--cycles` updates have been rendered.
///
/// Failed cycles are reported on stderr and polling carries on.
pub async fn execute(args: &WatchArgs, settings: ClientSettings, json: bool) -> Result<()> {
    let settings = match args.interval_ms {
        Some(ms) => settings.with_poll_interval_ms(ms),
        None => settings,
    };
    settings.validate().map_err(CliError::from)?;

    let api = Arc::new(HttpTelemetryApi::new(&settings).map_err(CliError::from)?);
    let (tx, mut rx) = mpsc::unbounded_channel();
    let error_tx = tx.clone();

    let handle = TelemetryPoller::start(
        api,
        &settings,
        move |update: &TelemetryUpdate| forward(&tx, Event::Update(Box::new(update.clone()))),
        move |error: &PollError| forward(&error_tx, Event::Failed(error.clone())),
    )
    .map_err(CliError::from)?;

    let layout = json.then_some(JsonLayout::Line);
    let mut rendered = 0u64;

    loop {
        tokio::select! {
            event = rx.recv() => match event {
                Some(Event::Update(update)) => {
                    output::print_view(args.view, &update.view, settings.canvas_size, layout)?;
                    rendered += 1;
                    if args.cycles.is_some_and(|limit| rendered >= limit) {
                        break;
                    }
                }
                Some(Event::Failed(error)) => output::print_poll_error(&error, json),
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                break;
            }
        }
    }

    handle.stop();
    info!(rendered, stats = ?handle.stats(), "Watch finished");
    Ok(())
}

//! One-shot telemetry fetch

use anyhow::Result;
use racedash_telemetry_config::ClientSettings;
use racedash_telemetry_poller::{HttpTelemetryApi, TelemetryPoller};
use tracing::info;

use crate::commands::View;
use crate::error::CliError;
use crate::output::{self, JsonLayout};

/// Run exactly one poll cycle and render it. Any endpoint failure is fatal.
pub async fn execute(view: View, settings: &ClientSettings, json: bool) -> Result<()> {
    let api = HttpTelemetryApi::new(settings).map_err(CliError::from)?;
    let state = TelemetryPoller::poll_once(&api, settings)
        .await
        .map_err(CliError::from)?;

    info!(players = state.players().len(), "Fetched telemetry snapshot");
    output::print_view(
        view,
        &state,
        settings.canvas_size,
        json.then_some(JsonLayout::Pretty),
    )
}

//! Command implementations for the racedash CLI

pub mod lookup;
pub mod snapshot;
pub mod watch;

use clap::{Args, ValueEnum};
use racedash_telemetry_config::ClientSettings;
use std::path::Path;
use tracing::debug;

use crate::error::CliError;

/// Which dashboard panel to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum View {
    /// Session header plus the focal driver's panel
    #[default]
    Dashboard,
    /// Classified drivers ordered by position
    Leaderboard,
    /// Driver markers on the track-map canvas
    Trackmap,
    /// Session header only
    Session,
}

#[derive(Debug, Clone, Args)]
pub struct WatchArgs {
    /// Panel to render on every update
    #[arg(long, value_enum, default_value_t = View::Dashboard)]
    pub view: View,

    /// Override the poll interval in milliseconds
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Exit after this many applied updates
    #[arg(long)]
    pub cycles: Option<u64>,
}

#[derive(Debug, Clone, Args)]
pub struct LookupArgs {
    /// Table name: tyre, track, session, team, ers or fuel
    pub table: String,

    /// Raw telemetry code
    #[arg(allow_negative_numbers = true)]
    pub code: i32,
}

/// Layer settings: file (or defaults), environment, then command-line flags.
pub fn resolve_settings(
    config: Option<&Path>,
    api_base: Option<&str>,
) -> Result<ClientSettings, CliError> {
    let mut settings = match config {
        Some(path) => ClientSettings::load(path)?,
        None => ClientSettings::default(),
    }
    .with_env_overrides();

    if let Some(api_base) = api_base {
        settings = settings.with_api_base(api_base);
    }

    settings.validate()?;
    debug!(api_base = %settings.api_base, "Resolved client settings");
    Ok(settings)
}

//! racedash - live F1 telemetry in the terminal
//!
//! Polls a telemetry backend's `/api/session` and `/api/players` endpoints and
//! renders the dashboard, leaderboard or track map.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod commands;
mod completion;
mod error;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use racedash_telemetry_config::API_BASE_ENV;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::{LookupArgs, View, WatchArgs};
use crate::error::CliError;

#[derive(Parser)]
#[command(name = "racedash")]
#[command(about = "Live F1 race telemetry dashboard")]
#[command(version)]
#[command(long_about = "
racedash polls a race telemetry backend and renders the session header, the
focal driver's dashboard, the leaderboard or the track map in the terminal.

Use --json for machine-readable output; `watch --json` emits one document per
line.
")]
struct Cli {
    #[arg(long, global = true, help = "Output in JSON format for machine parsing")]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Settings file (YAML)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Telemetry API base URL
    #[arg(long, global = true, env = API_BASE_ENV, value_name = "URL")]
    api_base: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll continuously and render every update
    Watch(WatchArgs),

    /// Fetch once and render
    Snapshot {
        #[arg(long, value_enum, default_value_t = View::Dashboard)]
        view: View,
    },

    /// Print the label for a raw telemetry code
    Lookup(LookupArgs),

    /// Generate shell completion scripts
    Completion {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "racedash={log_level},racedash_telemetry_poller={log_level},racedash_telemetry_config={log_level}"
                )
                .into()
            }),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let result = execute_command(&cli).await;

    match result {
        Ok(()) => Ok(()),
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }

            let exit_code = e.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            std::process::exit(exit_code);
        }
    }
}

async fn execute_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Watch(args) => {
            let settings =
                commands::resolve_settings(cli.config.as_deref(), cli.api_base.as_deref())?;
            commands::watch::execute(args, settings, cli.json).await
        }
        Commands::Snapshot { view } => {
            let settings =
                commands::resolve_settings(cli.config.as_deref(), cli.api_base.as_deref())?;
            commands::snapshot::execute(*view, &settings, cli.json).await
        }
        Commands::Lookup(args) => commands::lookup::execute(args, cli.json),
        Commands::Completion { shell } => {
            completion::generate_completion(*shell);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn parse_watch_defaults() -> TestResult {
        let cli = Cli::try_parse_from(["racedash", "watch"])?;
        assert!(!cli.json);
        assert_eq!(cli.verbose, 0);
        assert!(cli.config.is_none());
        match &cli.command {
            Commands::Watch(args) => {
                assert_eq!(args.view, View::Dashboard);
                assert!(args.interval_ms.is_none());
                assert!(args.cycles.is_none());
            }
            _ => return Err("expected Watch command".into()),
        }
        Ok(())
    }

    #[test]
    fn parse_watch_options() -> TestResult {
        let cli = Cli::try_parse_from([
            "racedash",
            "watch",
            "--view",
            "leaderboard",
            "--interval-ms",
            "250",
            "--cycles",
            "3",
        ])?;
        match &cli.command {
            Commands::Watch(args) => {
                assert_eq!(args.view, View::Leaderboard);
                assert_eq!(args.interval_ms, Some(250));
                assert_eq!(args.cycles, Some(3));
            }
            _ => return Err("expected Watch command".into()),
        }
        Ok(())
    }

    #[test]
    fn parse_global_flags_after_subcommand() -> TestResult {
        let cli = Cli::try_parse_from([
            "racedash",
            "snapshot",
            "--view",
            "trackmap",
            "--json",
            "-vv",
            "--api-base",
            "http://pitwall:8000",
            "--config",
            "racedash.yaml",
        ])?;
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.api_base.as_deref(), Some("http://pitwall:8000"));
        assert_eq!(cli.config, Some(PathBuf::from("racedash.yaml")));
        assert!(matches!(
            cli.command,
            Commands::Snapshot {
                view: View::Trackmap
            }
        ));
        Ok(())
    }

    #[test]
    fn parse_lookup_accepts_negative_codes() -> TestResult {
        let cli = Cli::try_parse_from(["racedash", "lookup", "team", "-1"])?;
        match &cli.command {
            Commands::Lookup(args) => {
                assert_eq!(args.table, "team");
                assert_eq!(args.code, -1);
            }
            _ => return Err("expected Lookup command".into()),
        }
        Ok(())
    }

    #[test]
    fn parse_rejects_unknown_view() {
        let result = Cli::try_parse_from(["racedash", "snapshot", "--view", "radar"]);
        assert!(matches!(result, Err(_)));
    }

    #[test]
    fn parse_completion_shell() -> TestResult {
        let cli = Cli::try_parse_from(["racedash", "completion", "zsh"])?;
        assert!(matches!(
            cli.command,
            Commands::Completion {
                shell: clap_complete::Shell::Zsh
            }
        ));
        Ok(())
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}

//! Output formatting for CLI responses

use anyhow::{Error, Result};
use colored::*;
use racedash_telemetry_core::TelemetryViewState;
use racedash_telemetry_display::{
    DriverPanel, LeaderboardRow, SessionHeaderView, TrackMarker, leaderboard, track_map,
};
use racedash_telemetry_poller::PollError;
use serde_json::{Value, json};

use crate::commands::View;
use crate::commands::lookup::Lookup;
use crate::error::CliError;

/// How JSON documents are laid out on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonLayout {
    /// One indented document.
    Pretty,
    /// One document per line, for streams.
    Line,
}

pub fn print_error_json(error: &Error) {
    let error_json = json!({
        "success": false,
        "error": {
            "message": error.to_string(),
            "type": error_type_name(error)
        }
    });
    match serde_json::to_string_pretty(&error_json) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("Failed to format error as JSON: {}", e),
    }
}

pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}

fn error_type_name(error: &Error) -> &'static str {
    match error.downcast_ref::<CliError>() {
        Some(CliError::InvalidConfiguration(_)) => "InvalidConfiguration",
        Some(CliError::ServiceUnavailable(_)) => "ServiceUnavailable",
        Some(CliError::BadResponse(_)) => "BadResponse",
        Some(CliError::UnknownLookupTable(_)) => "UnknownLookupTable",
        Some(CliError::JsonError(_)) => "JsonError",
        None => "Error",
    }
}

/// Report a failed poll cycle without ending the stream.
pub fn print_poll_error(error: &PollError, json: bool) {
    if json {
        let causes: Vec<Value> = error
            .causes()
            .iter()
            .map(|cause| {
                json!({
                    "endpoint": cause.endpoint().path(),
                    "kind": format!("{:?}", cause.kind()),
                    "message": cause.to_string(),
                })
            })
            .collect();
        eprintln!("{}", json!({ "success": false, "errors": causes }));
    } else {
        eprintln!("{} {}", "Poll failed:".yellow().bold(), error);
    }
}

pub fn print_lookup(lookup: &Lookup, json: bool) -> Result<()> {
    if json {
        let output = json!({
            "success": true,
            "lookup": lookup,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        match lookup.color {
            Some(color) => println!("{} {}", lookup.label.bold(), paint("●", color)),
            None => println!("{}", lookup.label.bold()),
        }
    }
    Ok(())
}

/// JSON document for one rendered view.
pub fn view_json(view: View, state: &TelemetryViewState, canvas_size: f64) -> Value {
    let session = state.session().map(SessionHeaderView::from_session);

    match view {
        View::Dashboard => json!({
            "success": true,
            "sequence": state.sequence(),
            "session": session,
            "driver": state.focal_player().map(DriverPanel::from_player),
        }),
        View::Leaderboard => json!({
            "success": true,
            "sequence": state.sequence(),
            "leaderboard": leaderboard(state.players()),
        }),
        View::Trackmap => json!({
            "success": true,
            "sequence": state.sequence(),
            "canvas_size": canvas_size,
            "markers": track_map(state.players(), canvas_size),
        }),
        View::Session => json!({
            "success": true,
            "session": session,
        }),
    }
}

pub fn print_view(
    view: View,
    state: &TelemetryViewState,
    canvas_size: f64,
    json: Option<JsonLayout>,
) -> Result<()> {
    match json {
        Some(JsonLayout::Pretty) => {
            println!(
                "{}",
                serde_json::to_string_pretty(&view_json(view, state, canvas_size))?
            );
        }
        Some(JsonLayout::Line) => {
            println!(
                "{}",
                serde_json::to_string(&view_json(view, state, canvas_size))?
            );
        }
        None => print_view_human(view, state, canvas_size),
    }
    Ok(())
}

fn print_view_human(view: View, state: &TelemetryViewState, canvas_size: f64) {
    match view {
        View::Dashboard => {
            print_session_human(state);
            match state.focal_player() {
                Some(player) => print_driver_human(&DriverPanel::from_player(player)),
                None => println!("{}", "No drivers on track".yellow()),
            }
        }
        View::Leaderboard => print_leaderboard_human(&leaderboard(state.players())),
        View::Trackmap => print_track_map_human(&track_map(state.players(), canvas_size)),
        View::Session => print_session_human(state),
    }
    println!();
}

fn print_session_human(state: &TelemetryViewState) {
    let Some(session) = state.session() else {
        println!("{}", "Waiting for session data".dimmed());
        return;
    };
    let header = SessionHeaderView::from_session(session);

    println!(
        "{} {} {}  Lap {}  Air {}  Track {}",
        header.session_name.bold(),
        "@".dimmed(),
        header.track_name.bold(),
        header.lap,
        header.air_temp,
        header.track_temp
    );
    if let Some(badge) = header.flag_badge {
        println!("  {}", badge.bold());
    }
}

fn print_driver_human(panel: &DriverPanel) {
    println!(
        "{} {} {}",
        panel.position.bold(),
        panel.name.bold(),
        paint(panel.team, panel.team_color)
    );
    println!(
        "  Lap {}  Best {}  {} km/h",
        panel.current_lap, panel.best_lap, panel.speed_kph
    );
    println!(
        "  Tyre {} ({} laps)  Fuel {} [{}]",
        tyre_badge(panel.tyre),
        panel.tyre_age_laps,
        panel.fuel,
        panel.fuel_mix
    );
    println!(
        "  ERS {:.0}% {}  DRS {}",
        panel.ers_percent,
        panel.ers_mode,
        if panel.drs_available {
            format!("available ({} m)", panel.drs_distance).green()
        } else {
            "closed".normal()
        }
    );

    let temps: Vec<String> = panel
        .tyre_temps
        .iter()
        .map(|reading| {
            format!(
                "{} {}",
                reading.corner.label(),
                paint(&format!("{:.0}°C", reading.celsius), reading.color)
            )
        })
        .collect();
    println!("  {}", temps.join("  "));

    if panel.warnings > 0 || panel.penalties > 0 {
        println!(
            "  {} warnings, {} penalties",
            panel.warnings.to_string().yellow(),
            panel.penalties.to_string().red()
        );
    }
}

fn print_leaderboard_human(rows: &[LeaderboardRow]) {
    if rows.is_empty() {
        println!("{}", "No classified drivers".yellow());
        return;
    }

    println!(
        "{}",
        format!(
            "{:>3}  {:<18} {:^5} {:>10} {:>10} {:>8}",
            "POS", "DRIVER", "TYRE", "CURRENT", "LAST", "SPEED"
        )
        .bold()
    );
    for row in rows {
        println!(
            "{:>3}  {:<18} {} {:>10} {:>10} {:>8}{}",
            row.position,
            row.name,
            tyre_badge(row.tyre),
            row.current_lap,
            row.last_lap,
            format!("{} km/h", row.speed_kph),
            if row.in_pit {
                format!("  {}", "PIT".yellow().bold())
            } else {
                String::new()
            }
        );
    }
}

fn print_track_map_human(markers: &[TrackMarker]) {
    if markers.is_empty() {
        println!("{}", "No classified drivers".yellow());
        return;
    }
    for marker in markers {
        let label = if marker.is_leader {
            marker.label.bold()
        } else {
            marker.label.normal()
        };
        println!(
            "{} {:<22} ({:>6.1}, {:>6.1})",
            paint("●", marker.color),
            label,
            marker.point.x,
            marker.point.z
        );
    }
}

fn tyre_badge(tyre: &'static str) -> ColoredString {
    let text = format!("{tyre:^5}");
    let color = racedash_telemetry_display::tyre_color(tyre);
    let ink = racedash_telemetry_display::tyre_text_color(tyre);

    match (hex_rgb(color), hex_rgb(ink)) {
        (Some((r, g, b)), Some((ir, ig, ib))) => text.on_truecolor(r, g, b).truecolor(ir, ig, ib),
        _ => text.normal(),
    }
}

fn paint(text: &str, hex: &str) -> ColoredString {
    match hex_rgb(hex) {
        Some((r, g, b)) => text.truecolor(r, g, b),
        None => text.normal(),
    }
}

/// `#RGB` or `#RRGGBB` to components.
fn hex_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        _ => return None,
    };
    let value = u32::from_str_radix(&expanded, 16).ok()?;
    let [_, r, g, b] = value.to_be_bytes();
    Some((r, g, b))
}

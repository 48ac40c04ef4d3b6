//! Render-ready view models for the dashboard panels.
//!
//! Each view is derived from one applied snapshot and holds only display
//! strings, colors and numbers; nothing here reads global state.

use racedash_telemetry_core::{Corner, Player, Session};
use serde::Serialize;

use crate::format::{CanvasPoint, format_lap_time, scale_world_to_canvas, temp_color};
use crate::tables::{
    ers_mode_label, fuel_mix_label, session_name, team_color, team_name, track_name, tyre_color,
    tyre_label, tyre_text_color,
};

const GREEN_FLAG: &str = "\u{1F7E2}";
const MISSING: &str = "--";

fn driver_name(player: &Player) -> String {
    if player.name.is_empty() {
        "Unknown".to_string()
    } else {
        player.name.clone()
    }
}

fn temperature(celsius: Option<f64>) -> String {
    match celsius {
        Some(t) if t != 0.0 => format!("{t}°C"),
        _ => format!("{MISSING}°C"),
    }
}

/// Session banner: kind, track, lap counter, weather and flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionHeaderView {
    pub session_name: &'static str,
    pub track_name: &'static str,
    pub lap: String,
    pub air_temp: String,
    pub track_temp: String,
    pub flag_badge: Option<String>,
}

impl SessionHeaderView {
    pub fn from_session(session: &Session) -> Self {
        let flag_badge = session.has_flag().then(|| {
            if session.flag == GREEN_FLAG {
                format!("{} GREEN FLAG", session.flag)
            } else {
                format!("{} FLAG", session.flag)
            }
        });

        Self {
            session_name: session_name(session.session_type),
            track_name: track_name(session.track),
            lap: format!(
                "{}/{}",
                session.current_lap.unwrap_or(0),
                session.nb_laps.unwrap_or(0)
            ),
            air_temp: temperature(session.air_temperature),
            track_temp: temperature(session.track_temperature),
            flag_badge,
        }
    }
}

/// One classified driver on the leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardRow {
    pub key: String,
    pub position: u32,
    pub name: String,
    pub tyre: &'static str,
    pub tyre_color: &'static str,
    pub tyre_text_color: &'static str,
    pub current_lap: String,
    pub last_lap: String,
    pub speed_kph: u32,
    pub in_pit: bool,
    pub ers_percent: f64,
}

/// Classified drivers ordered by position; ties keep list order.
pub fn leaderboard(players: &[Player]) -> Vec<LeaderboardRow> {
    let mut rows: Vec<LeaderboardRow> = players
        .iter()
        .filter_map(|player| {
            let position = player.classified_position()?;
            let tyre = tyre_label(player.tyres);
            Some(LeaderboardRow {
                key: player.display_key(),
                position,
                name: driver_name(player),
                tyre,
                tyre_color: tyre_color(tyre),
                tyre_text_color: tyre_text_color(tyre),
                current_lap: format_lap_time(player.current_lap_time),
                last_lap: format_lap_time(player.last_lap_time),
                speed_kph: player.speed.unwrap_or(0),
                in_pit: player.in_pit(),
                ers_percent: player.ers_percentage.unwrap_or(0.0),
            })
        })
        .collect();
    rows.sort_by_key(|row| row.position);
    rows
}

/// Surface temperature of one wheel with its ramp color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TyreTempReading {
    pub corner: Corner,
    pub celsius: f32,
    pub color: &'static str,
}

/// Single-driver dashboard for the focal player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverPanel {
    pub name: String,
    pub position: String,
    pub team: &'static str,
    pub team_color: &'static str,
    pub current_lap: String,
    pub best_lap: String,
    pub fuel: String,
    pub fuel_mix: &'static str,
    pub speed_kph: u32,
    pub ers_percent: f64,
    pub ers_mode: &'static str,
    pub drs_available: bool,
    pub drs_distance: u32,
    pub tyre: &'static str,
    pub tyre_age_laps: u32,
    pub tyre_temps: [TyreTempReading; 4],
    pub warnings: u32,
    pub penalties: u32,
}

impl DriverPanel {
    pub fn from_player(player: &Player) -> Self {
        let tyre_temps = Corner::ALL.map(|corner| {
            let celsius = player.surface_temp(corner);
            TyreTempReading {
                corner,
                celsius,
                color: temp_color(f64::from(celsius), false),
            }
        });

        let fuel = if player.fuel_remaining_laps > 0.0 {
            format!("{} Laps", two_decimals(player.fuel_remaining_laps))
        } else {
            MISSING.to_string()
        };

        Self {
            name: driver_name(player),
            position: player
                .classified_position()
                .map_or_else(|| MISSING.to_string(), |p| format!("P{p}")),
            team: team_name(player.team_id),
            team_color: team_color(player.team_id),
            current_lap: format_lap_time(player.current_lap_time),
            best_lap: format_lap_time(player.best_lap_time),
            fuel,
            fuel_mix: fuel_mix_label(player.fuel_mix),
            speed_kph: player.speed.unwrap_or(0),
            ers_percent: player.ers_percentage.unwrap_or(0.0),
            ers_mode: ers_mode_label(player.ers_mode),
            drs_available: player.drs_available(),
            drs_distance: player.drs_activation_distance,
            tyre: tyre_label(player.tyres),
            tyre_age_laps: player.tyres_age_laps,
            tyre_temps,
            warnings: player.warnings,
            penalties: player.penalties,
        }
    }
}

/// Two decimals with ties rounded away from zero (`0.125` → `0.13`).
fn two_decimals(value: f64) -> String {
    format!("{:.2}", (value * 100.0).round() / 100.0)
}

/// A driver dot on the track map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackMarker {
    pub key: String,
    pub label: String,
    pub position: u32,
    pub point: CanvasPoint,
    pub color: &'static str,
    pub is_leader: bool,
}

/// Markers for every classified driver, in list order.
pub fn track_map(players: &[Player], canvas_size: f64) -> Vec<TrackMarker> {
    players
        .iter()
        .filter_map(|player| {
            let position = player.classified_position()?;
            Some(TrackMarker {
                key: player.display_key(),
                label: format!("{position}. {}", player.name),
                position,
                point: scale_world_to_canvas(
                    player.world_position_x,
                    player.world_position_z,
                    canvas_size,
                ),
                color: team_color(player.team_id),
                is_leader: position == 1,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driver(name: &str, position: Option<u32>) -> Player {
        Player {
            name: name.to_string(),
            position,
            ..Player::default()
        }
    }

    #[test]
    fn session_header_maps_codes_and_lap_counter() {
        let session = Session {
            track: Some(9),
            session_type: Some(15),
            current_lap: Some(12),
            nb_laps: Some(70),
            air_temperature: Some(28.0),
            track_temperature: None,
            flag: String::new(),
        };

        let view = SessionHeaderView::from_session(&session);

        assert_eq!(view.session_name, "Race");
        assert_eq!(view.track_name, "Hungaroring");
        assert_eq!(view.lap, "12/70");
        assert_eq!(view.air_temp, "28°C");
        assert_eq!(view.track_temp, "--°C");
        assert_eq!(view.flag_badge, None);
    }

    #[test]
    fn session_header_defaults_for_empty_session() {
        let view = SessionHeaderView::from_session(&Session::default());

        assert_eq!(view.session_name, "Unknown");
        assert_eq!(view.track_name, "Unknown");
        assert_eq!(view.lap, "0/0");
    }

    #[test]
    fn session_header_flag_badges() {
        let green = Session {
            flag: GREEN_FLAG.to_string(),
            ..Session::default()
        };
        let yellow = Session {
            flag: "\u{1F7E1}".to_string(),
            ..Session::default()
        };

        assert_eq!(
            SessionHeaderView::from_session(&green).flag_badge,
            Some(format!("{GREEN_FLAG} GREEN FLAG"))
        );
        assert_eq!(
            SessionHeaderView::from_session(&yellow).flag_badge,
            Some("\u{1F7E1} FLAG".to_string())
        );
    }

    #[test]
    fn leaderboard_filters_and_sorts_by_position() {
        let players = vec![
            driver("unranked", None),
            driver("third", Some(3)),
            driver("first", Some(1)),
            driver("zero", Some(0)),
            driver("second", Some(2)),
        ];

        let names: Vec<String> = leaderboard(&players).into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn leaderboard_row_fields() {
        let player = Player {
            name: String::new(),
            position: Some(1),
            tyres: Some(18),
            last_lap_time: Some(89_706),
            pit: true,
            ..Player::default()
        };

        let rows = leaderboard(&[player]);
        let row = rows.first().ok_or("missing row");

        assert_eq!(row.map(|r| r.name.as_str()), Ok("Unknown"));
        assert_eq!(row.map(|r| r.tyre), Ok("H"));
        assert_eq!(row.map(|r| r.tyre_text_color), Ok("#000"));
        assert_eq!(row.map(|r| r.last_lap.as_str()), Ok("1:29.706"));
        assert_eq!(row.map(|r| r.current_lap.as_str()), Ok("--:--.---"));
        assert_eq!(row.map(|r| r.speed_kph), Ok(0));
        assert_eq!(row.map(|r| r.in_pit), Ok(true));
    }

    #[test]
    fn fuel_ties_round_up() {
        assert_eq!(two_decimals(0.125), "0.13");
        assert_eq!(two_decimals(2.5), "2.50");
        assert_eq!(two_decimals(3.456), "3.46");
        assert_eq!(two_decimals(10.0), "10.00");

        let panel = DriverPanel::from_player(&Player {
            fuel_remaining_laps: 0.375,
            ..Player::default()
        });
        assert_eq!(panel.fuel, "0.38 Laps");
    }

    #[test]
    fn driver_panel_for_unclassified_player() {
        let panel = DriverPanel::from_player(&Player::default());

        assert_eq!(panel.position, "--");
        assert_eq!(panel.fuel, "--");
        assert_eq!(panel.ers_mode, "PRIVATE");
        assert_eq!(panel.team, "Unknown");
        assert_eq!(panel.team_color, "#FFFFFF");
        assert_eq!(panel.tyre, "-");
    }

    #[test]
    fn driver_panel_formats_fuel_and_temps() {
        let player = Player {
            name: "LECLERC".to_string(),
            position: Some(2),
            team_id: 1,
            fuel_remaining_laps: 3.456,
            fuel_mix: 2,
            ers_mode: 2,
            tyres_temp_surface: [79.0, 80.0, 95.0, 101.0],
            drs_allowed: true,
            ..Player::default()
        };

        let panel = DriverPanel::from_player(&player);

        assert_eq!(panel.position, "P2");
        assert_eq!(panel.team, "Ferrari");
        assert_eq!(panel.fuel, "3.46 Laps");
        assert_eq!(panel.fuel_mix, "Rich");
        assert_eq!(panel.ers_mode, "HOTLAP");
        assert!(panel.drs_available);

        let colors: Vec<&str> = panel.tyre_temps.iter().map(|t| t.color).collect();
        assert_eq!(colors, vec!["#0000ff", "#00ff00", "#ffff00", "#ff0000"]);
    }

    #[test]
    fn track_map_places_classified_players_only() {
        let mut leader = driver("VER", Some(1));
        leader.team_id = 2;
        leader.network_id = Some(33);
        let mut chaser = driver("PER", Some(4));
        chaser.world_position_x = 100_000.0;
        chaser.world_position_z = -900_000.0;

        let markers = track_map(&[driver("pit", None), chaser, leader], 400.0);

        assert_eq!(markers.len(), 2);
        let keys: Vec<&str> = markers.iter().map(|m| m.key.as_str()).collect();
        assert_eq!(keys, vec!["PER", "33"]);

        let leader_marker = markers.iter().find(|m| m.is_leader).ok_or("no leader");
        assert_eq!(leader_marker.map(|m| m.color), Ok("#0000FF"));
        assert_eq!(leader_marker.map(|m| m.label.as_str()), Ok("1. VER"));

        let chaser_marker = markers.iter().find(|m| !m.is_leader).ok_or("no chaser");
        assert_eq!(
            chaser_marker.map(|m| m.point),
            Ok(CanvasPoint { x: 300.0, z: 0.0 })
        );
    }
}

//! Presentation mapping for race telemetry.
//!
//! Pure, stateless functions that turn raw telemetry codes and numbers into
//! what a dashboard draws:
//!
//! | Input | Function | Example |
//! |-------|----------|---------|
//! | tyre compound code | [`tyre_label`] | `18` → `H` |
//! | track id | [`track_name`] | `9` → `Hungaroring` |
//! | session type id | [`session_name`] | `15` → `Race` |
//! | team id | [`team_color`], [`team_name`] | `1` → `#FF0000`, `Ferrari` |
//! | ERS mode / fuel mix | [`ers_mode_label`], [`fuel_mix_label`] | `3` → `OVERTAKE` |
//! | lap time (ms) | [`format_lap_time`] | `89706` → `1:29.706` |
//! | world position | [`scale_world_to_canvas`] | `(0, 0)` → `(200, 200)` on 400 px |
//! | temperature | [`temp_color`] | `80 °C` tyre → green |
//!
//! Unmapped codes resolve to a fixed fallback; nothing here returns an error.

#![deny(static_mut_refs)]

pub mod format;
pub mod tables;
pub mod views;

pub use format::{
    CanvasPoint, LAP_TIME_PLACEHOLDER, TempBand, format_lap_time, scale_world_to_canvas,
    temp_color,
};
pub use tables::{
    ERS_MODES, FUEL_MIXES, LookupTable, SESSION_TYPES, TEAM_COLORS, TEAM_NAMES, TRACKS,
    TYRE_COLORS, TYRE_COMPOUNDS, ers_mode_label, fuel_mix_label, map_code, map_optional_code,
    session_name, team_color, team_name, track_name, tyre_color, tyre_label, tyre_text_color,
};
pub use views::{
    DriverPanel, LeaderboardRow, SessionHeaderView, TrackMarker, TyreTempReading, leaderboard,
    track_map,
};

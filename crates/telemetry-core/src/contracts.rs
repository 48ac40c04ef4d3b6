//! Wire contracts for the telemetry API.
//!
//! Field names follow the backend serializer exactly, including its irregular
//! spellings (`tyres_temp_surface`, `ERS_mode`, `DRS_allowed`, ...). Every
//! field carries a default so that a partially populated object still decodes.

use serde::{Deserialize, Deserializer, Serialize};

use crate::lenient::{self, Loose};

/// Wheel corner, in the order the backend sends per-corner arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    FrontLeft,
    FrontRight,
    RearLeft,
    RearRight,
}

impl Corner {
    /// All corners in wire order: FL, FR, RL, RR.
    pub const ALL: [Corner; 4] = [
        Corner::FrontLeft,
        Corner::FrontRight,
        Corner::RearLeft,
        Corner::RearRight,
    ];

    /// Position of this corner inside a per-corner array.
    pub const fn index(self) -> usize {
        match self {
            Corner::FrontLeft => 0,
            Corner::FrontRight => 1,
            Corner::RearLeft => 2,
            Corner::RearRight => 3,
        }
    }

    /// Short label used on dashboards.
    pub const fn label(self) -> &'static str {
        match self {
            Corner::FrontLeft => "FL",
            Corner::FrontRight => "FR",
            Corner::RearLeft => "RL",
            Corner::RearRight => "RR",
        }
    }
}

fn unknown_code() -> i32 {
    -1
}

fn three_sectors() -> Vec<f64> {
    vec![0.0; 3]
}

/// Compound code, or a compound label such as `"Soft"`.
fn tyre_compound<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i32>, D::Error> {
    let value = Loose::deserialize(deserializer)?;
    if let Some(code) = value.as_i64() {
        return Ok(i32::try_from(code).ok());
    }
    let Loose::Text(label) = value else {
        return Ok(None);
    };
    Ok(match label.trim().to_ascii_lowercase().chars().next() {
        Some('s') => Some(16),
        Some('m') => Some(17),
        Some('h') => Some(18),
        Some('i') => Some(7),
        Some('w') => Some(8),
        _ => None,
    })
}

/// One race participant's live snapshot.
///
/// Produced fresh on every poll; nothing is mutated between fetches. Scalars
/// decode leniently: a field of the wrong shape takes
/// its default instead of failing the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    /// Race rank, 1-based. `None` or `Some(0)` means not yet classified.
    #[serde(default, deserialize_with = "lenient::opt_u32")]
    pub position: Option<u32>,
    /// Speed in km/h.
    #[serde(default, deserialize_with = "lenient::opt_u32")]
    pub speed: Option<u32>,
    /// Lap times in milliseconds; fractions are truncated.
    #[serde(default, deserialize_with = "lenient::opt_u32")]
    pub last_lap_time: Option<u32>,
    #[serde(default, deserialize_with = "lenient::opt_u32")]
    pub current_lap_time: Option<u32>,
    #[serde(default, deserialize_with = "lenient::opt_u32")]
    pub best_lap_time: Option<u32>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub lap_distance: Option<f64>,
    /// Tyre compound code.
    #[serde(default, deserialize_with = "tyre_compound")]
    pub tyres: Option<i32>,
    #[serde(default, deserialize_with = "lenient::u32_or_zero")]
    pub tyres_age_laps: u32,
    #[serde(default, rename = "tyre_wear", deserialize_with = "lenient::f64_seq")]
    pub tyre_wear: Vec<f64>,
    /// Surface temperatures in °C, FL/FR/RL/RR.
    #[serde(default, rename = "tyres_temp_surface", deserialize_with = "lenient::corners")]
    pub tyres_temp_surface: [f32; 4],
    /// Inner temperatures in °C, FL/FR/RL/RR.
    #[serde(default, rename = "tyres_temp_inner", deserialize_with = "lenient::corners")]
    pub tyres_temp_inner: [f32; 4],
    #[serde(default, rename = "ERS_percentage", deserialize_with = "lenient::opt_f64")]
    pub ers_percentage: Option<f64>,
    #[serde(
        default = "unknown_code",
        rename = "ERS_mode",
        deserialize_with = "lenient::i32_or_unknown"
    )]
    pub ers_mode: i32,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub fuel_remaining_laps: f64,
    #[serde(default, deserialize_with = "lenient::i32_or_zero")]
    pub fuel_mix: i32,
    #[serde(default, deserialize_with = "lenient::opt_i32")]
    pub network_id: Option<i32>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub pit: bool,
    #[serde(default = "unknown_code", deserialize_with = "lenient::i32_or_unknown")]
    pub team_id: i32,
    #[serde(default, deserialize_with = "lenient::u32_or_zero")]
    pub race_number: u32,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub drs: bool,
    #[serde(default, rename = "DRS_allowed", deserialize_with = "lenient::flag")]
    pub drs_allowed: bool,
    #[serde(
        default,
        rename = "DRS_activation_distance",
        deserialize_with = "lenient::u32_or_zero"
    )]
    pub drs_activation_distance: u32,
    #[serde(default, deserialize_with = "lenient::u32_or_zero")]
    pub warnings: u32,
    #[serde(default, deserialize_with = "lenient::u32_or_zero")]
    pub penalties: u32,
    #[serde(default = "three_sectors", deserialize_with = "lenient::f64_seq")]
    pub current_sectors: Vec<f64>,
    #[serde(default = "three_sectors", deserialize_with = "lenient::f64_seq")]
    pub last_lap_sectors: Vec<f64>,
    #[serde(default = "three_sectors", deserialize_with = "lenient::f64_seq")]
    pub best_lap_sectors: Vec<f64>,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub world_position_x: f64,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub world_position_z: f64,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub front_left_wing_damage: f64,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub front_right_wing_damage: f64,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub rear_wing_damage: f64,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub floor_damage: f64,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub diffuser_damage: f64,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub sidepod_damage: f64,
    #[serde(default, rename = "gap_to_car_ahead", deserialize_with = "lenient::f64_or_zero")]
    pub gap_to_car_ahead: f64,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            name: String::new(),
            position: None,
            speed: None,
            last_lap_time: None,
            current_lap_time: None,
            best_lap_time: None,
            lap_distance: None,
            tyres: None,
            tyres_age_laps: 0,
            tyre_wear: Vec::new(),
            tyres_temp_surface: [0.0; 4],
            tyres_temp_inner: [0.0; 4],
            ers_percentage: None,
            ers_mode: unknown_code(),
            fuel_remaining_laps: 0.0,
            fuel_mix: 0,
            network_id: None,
            pit: false,
            team_id: unknown_code(),
            race_number: 0,
            drs: false,
            drs_allowed: false,
            drs_activation_distance: 0,
            warnings: 0,
            penalties: 0,
            current_sectors: three_sectors(),
            last_lap_sectors: three_sectors(),
            best_lap_sectors: three_sectors(),
            world_position_x: 0.0,
            world_position_z: 0.0,
            front_left_wing_damage: 0.0,
            front_right_wing_damage: 0.0,
            rear_wing_damage: 0.0,
            floor_damage: 0.0,
            diffuser_damage: 0.0,
            sidepod_damage: 0.0,
            gap_to_car_ahead: 0.0,
        }
    }
}

impl Player {
    /// The race rank once the source system has assigned one.
    pub fn classified_position(&self) -> Option<u32> {
        self.position.filter(|&position| position > 0)
    }

    pub fn is_classified(&self) -> bool {
        self.classified_position().is_some()
    }

    /// Identity used to match a driver across fetches: a non-zero network id,
    /// else the name.
    pub fn display_key(&self) -> String {
        match self.network_id.filter(|&id| id != 0) {
            Some(id) => id.to_string(),
            None => self.name.clone(),
        }
    }

    pub fn drs_available(&self) -> bool {
        self.drs_allowed || self.drs
    }

    pub fn in_pit(&self) -> bool {
        self.pit
    }

    pub fn surface_temp(&self, corner: Corner) -> f32 {
        self.tyres_temp_surface
            .get(corner.index())
            .copied()
            .unwrap_or_default()
    }

    pub fn inner_temp(&self, corner: Corner) -> f32 {
        self.tyres_temp_inner
            .get(corner.index())
            .copied()
            .unwrap_or_default()
    }
}

/// Race-weekend global state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Track id.
    #[serde(default, deserialize_with = "lenient::opt_i32")]
    pub track: Option<i32>,
    /// Session-kind id.
    #[serde(default, deserialize_with = "lenient::opt_i32")]
    pub session_type: Option<i32>,
    #[serde(default, deserialize_with = "lenient::opt_u32")]
    pub current_lap: Option<u32>,
    #[serde(default, deserialize_with = "lenient::opt_u32")]
    pub nb_laps: Option<u32>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub air_temperature: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub track_temperature: Option<f64>,
    /// Free-text flag state (often an emoji); empty when no flag is shown.
    #[serde(default, deserialize_with = "lenient::text")]
    pub flag: String,
}

impl Session {
    pub fn has_flag(&self) -> bool {
        !self.flag.is_empty()
    }
}

//! Numeric formatting, track-map projection and temperature color ramps.

use serde::Serialize;

/// Shown wherever a lap time is missing.
pub const LAP_TIME_PLACEHOLDER: &str = "--:--.---";

/// Format a lap time in milliseconds.
///
/// Two layouts: `M:SS.mmm` once a minute has elapsed, `S.mmm` below that.
/// A missing or zero time yields [`LAP_TIME_PLACEHOLDER`].
///
/// ```
/// use racedash_telemetry_display::format_lap_time;
///
/// assert_eq!(format_lap_time(Some(89_706)), "1:29.706");
/// assert_eq!(format_lap_time(Some(706)), "0.706");
/// assert_eq!(format_lap_time(None), "--:--.---");
/// ```
pub fn format_lap_time(ms: Option<u32>) -> String {
    let ms = match ms {
        None | Some(0) => return LAP_TIME_PLACEHOLDER.to_string(),
        Some(ms) => ms,
    };

    let minutes = ms / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    if minutes > 0 {
        format!("{minutes}:{seconds:02}.{millis:03}")
    } else {
        format!("{seconds}.{millis:03}")
    }
}

/// A position on the square track-map canvas, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CanvasPoint {
    pub x: f64,
    pub z: f64,
}

/// Project world coordinates onto a square canvas.
///
/// `coord / 1000 + canvas_size / 2`, saturated to `[0, canvas_size]`. Points
/// far outside the expected range collapse onto the edge instead of being
/// rejected.
pub fn scale_world_to_canvas(x: f64, z: f64, canvas_size: f64) -> CanvasPoint {
    let size = if canvas_size.is_finite() && canvas_size > 0.0 {
        canvas_size
    } else {
        0.0
    };
    let half = size / 2.0;

    CanvasPoint {
        x: saturate(x / 1000.0 + half, size),
        z: saturate(z / 1000.0 + half, size),
    }
}

fn saturate(value: f64, upper: f64) -> f64 {
    if value.is_nan() || value <= 0.0 {
        0.0
    } else {
        value.min(upper)
    }
}

/// Color band of a tyre or brake temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TempBand {
    Cold,
    Optimal,
    Warm,
    Hot,
    Overheating,
}

impl TempBand {
    /// Tyre surface ramp: <80 cold, <90 optimal, <100 warm, else overheating.
    pub fn for_tyre(celsius: f64) -> Self {
        if celsius < 80.0 {
            TempBand::Cold
        } else if celsius < 90.0 {
            TempBand::Optimal
        } else if celsius < 100.0 {
            TempBand::Warm
        } else {
            TempBand::Overheating
        }
    }

    /// Brake ramp: <200 optimal, <300 warm, <400 hot, else overheating.
    pub fn for_brake(celsius: f64) -> Self {
        if celsius < 200.0 {
            TempBand::Optimal
        } else if celsius < 300.0 {
            TempBand::Warm
        } else if celsius < 400.0 {
            TempBand::Hot
        } else {
            TempBand::Overheating
        }
    }

    pub const fn hex(self) -> &'static str {
        match self {
            TempBand::Cold => "#0000ff",
            TempBand::Optimal => "#00ff00",
            TempBand::Warm => "#ffff00",
            TempBand::Hot => "#ff9300",
            TempBand::Overheating => "#ff0000",
        }
    }
}

/// Color for a temperature reading. Boundaries belong to the hotter band.
pub fn temp_color(celsius: f64, is_brake: bool) -> &'static str {
    let band = if is_brake {
        TempBand::for_brake(celsius)
    } else {
        TempBand::for_tyre(celsius)
    };
    band.hex()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lap_time_placeholder_for_missing_or_zero() {
        assert_eq!(format_lap_time(None), LAP_TIME_PLACEHOLDER);
        assert_eq!(format_lap_time(Some(0)), LAP_TIME_PLACEHOLDER);
    }

    #[test]
    fn lap_time_minutes_branch_pads_seconds_and_millis() {
        assert_eq!(format_lap_time(Some(89_706)), "1:29.706");
        assert_eq!(format_lap_time(Some(60_000)), "1:00.000");
        assert_eq!(format_lap_time(Some(61_005)), "1:01.005");
        assert_eq!(format_lap_time(Some(605_999)), "10:05.999");
    }

    #[test]
    fn lap_time_sub_minute_branch_has_no_minutes_field() {
        assert_eq!(format_lap_time(Some(706)), "0.706");
        assert_eq!(format_lap_time(Some(5_040)), "5.040");
        assert_eq!(format_lap_time(Some(59_999)), "59.999");
        assert_eq!(format_lap_time(Some(1)), "0.001");
    }

    #[test]
    fn canvas_center_for_origin() {
        let point = scale_world_to_canvas(0.0, 0.0, 400.0);
        assert_eq!(point, CanvasPoint { x: 200.0, z: 200.0 });
    }

    #[test]
    fn canvas_scales_by_one_thousandth() {
        let point = scale_world_to_canvas(50_000.0, -150_000.0, 400.0);
        assert_eq!(point, CanvasPoint { x: 250.0, z: 50.0 });
    }

    #[test]
    fn canvas_clamps_to_edges() {
        let point = scale_world_to_canvas(-250_000.0, 900_000.0, 400.0);
        assert_eq!(point, CanvasPoint { x: 0.0, z: 400.0 });
    }

    #[test]
    fn canvas_handles_non_finite_input() {
        let point = scale_world_to_canvas(f64::NAN, f64::INFINITY, 400.0);
        assert_eq!(point, CanvasPoint { x: 0.0, z: 400.0 });

        let degenerate = scale_world_to_canvas(10.0, 10.0, -5.0);
        assert_eq!(degenerate, CanvasPoint { x: 0.0, z: 0.0 });
    }

    #[test]
    fn tyre_ramp_boundaries_are_lower_inclusive_on_upper_band() {
        assert_eq!(temp_color(79.0, false), "#0000ff");
        assert_eq!(temp_color(80.0, false), "#00ff00");
        assert_eq!(temp_color(89.9, false), "#00ff00");
        assert_eq!(temp_color(90.0, false), "#ffff00");
        assert_eq!(temp_color(100.0, false), "#ff0000");
    }

    #[test]
    fn brake_ramp_boundaries() {
        assert_eq!(temp_color(199.0, true), "#00ff00");
        assert_eq!(temp_color(200.0, true), "#ffff00");
        assert_eq!(temp_color(300.0, true), "#ff9300");
        assert_eq!(temp_color(399.0, true), "#ff9300");
        assert_eq!(temp_color(400.0, true), "#ff0000");
    }

    #[test]
    fn bands_map_to_ramp_colors() {
        assert_eq!(TempBand::for_tyre(-10.0), TempBand::Cold);
        assert_eq!(TempBand::for_brake(-10.0), TempBand::Optimal);
        assert_eq!(TempBand::for_brake(1_000.0), TempBand::Overheating);
        assert_eq!(TempBand::Hot.hex(), "#ff9300");
    }
}

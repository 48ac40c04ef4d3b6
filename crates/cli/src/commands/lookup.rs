//! Code table lookups

use anyhow::Result;
use racedash_telemetry_display::{
    ers_mode_label, fuel_mix_label, session_name, team_color, team_name, track_name, tyre_color,
    tyre_label,
};
use serde::Serialize;

use crate::commands::LookupArgs;
use crate::error::CliError;
use crate::output;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lookup {
    pub table: &'static str,
    pub code: i32,
    pub label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<&'static str>,
}

/// Resolve `code` in the named table. Unmapped codes get the table's fallback.
pub fn resolve(table: &str, code: i32) -> Result<Lookup, CliError> {
    let (table, label, color) = match table.to_ascii_lowercase().as_str() {
        "tyre" | "tyres" | "compound" => {
            let label = tyre_label(Some(code));
            ("tyre", label, Some(tyre_color(label)))
        }
        "track" => ("track", track_name(Some(code)), None),
        "session" => ("session", session_name(Some(code)), None),
        "team" => ("team", team_name(code), Some(team_color(code))),
        "ers" => ("ers", ers_mode_label(code), None),
        "fuel" => ("fuel", fuel_mix_label(code), None),
        _ => return Err(CliError::UnknownLookupTable(table.to_string())),
    };

    Ok(Lookup {
        table,
        code,
        label,
        color,
    })
}

pub fn execute(args: &LookupArgs, json: bool) -> Result<()> {
    let lookup = resolve(&args.table, args.code)?;
    output::print_lookup(&lookup, json)
}

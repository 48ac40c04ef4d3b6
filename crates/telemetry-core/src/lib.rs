//! Core race telemetry types for racedash.
//!
//! ## Modules
//! - `contracts` - Wire types for the telemetry API (`Player`, `Session`, `Corner`)
//! - `view_state` - Owned view state and focal-driver selection

#![deny(static_mut_refs)]

pub mod contracts;
mod lenient;
pub mod view_state;

pub use contracts::{Corner, Player, Session};
pub use view_state::{TelemetryViewState, select_focal_player};

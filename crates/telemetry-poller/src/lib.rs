//! Telemetry polling loop for racedash.
//!
//! [`TelemetryPoller::start`] fetches `/api/session` and `/api/players` on a
//! fixed cadence, keeps the freshest snapshot in a shared
//! [`TelemetryViewState`](racedash_telemetry_core::TelemetryViewState) and
//! reports each cycle through the caller's callbacks. The returned
//! [`PollerHandle`] stops the loop.

#![deny(static_mut_refs)]

pub mod api;
pub mod error;
pub mod poller;

pub use api::{HttpTelemetryApi, TelemetryApi};
pub use error::{Endpoint, FailureKind, FetchError, PollError, StartError};
pub use poller::{PollerHandle, PollerStats, StopToken, TelemetryPoller, TelemetryUpdate};

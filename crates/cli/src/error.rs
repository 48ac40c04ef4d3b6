//! Error types for the racedash CLI

use racedash_telemetry_config::ConfigError;
use racedash_telemetry_poller::{FailureKind, PollError, StartError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Telemetry API unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Unexpected telemetry response: {0}")]
    BadResponse(String),

    #[error("Unknown lookup table `{0}` (expected tyre, track, session, team, ers or fuel)")]
    UnknownLookupTable(String),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidConfiguration(_) | CliError::UnknownLookupTable(_) => 4,
            CliError::ServiceUnavailable(_) => 5,
            CliError::BadResponse(_) | CliError::JsonError(_) => 1,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::InvalidConfiguration(err.to_string())
    }
}

impl From<StartError> for CliError {
    fn from(err: StartError) -> Self {
        match err {
            StartError::InvalidSettings(err) => err.into(),
            other => CliError::ServiceUnavailable(other.to_string()),
        }
    }
}

impl From<PollError> for CliError {
    fn from(err: PollError) -> Self {
        match err.kind() {
            FailureKind::Network => CliError::ServiceUnavailable(err.to_string()),
            FailureKind::Protocol => CliError::BadResponse(err.to_string()),
        }
    }
}

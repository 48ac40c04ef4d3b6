//! Error types for the polling loop.

use racedash_telemetry_config::ConfigError;
use std::fmt;
use thiserror::Error;

/// Telemetry API endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Session,
    Players,
}

impl Endpoint {
    pub const fn path(self) -> &'static str {
        match self {
            Endpoint::Session => "/api/session",
            Endpoint::Players => "/api/players",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Coarse classification of a failed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The server could not be reached or did not answer in time.
    Network,
    /// The server answered, but not with a usable document.
    Protocol,
}

/// One failed endpoint request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("{endpoint} timed out")]
    Timeout { endpoint: Endpoint },

    #[error("{endpoint} unreachable: {message}")]
    Network { endpoint: Endpoint, message: String },

    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: Endpoint, status: u16 },

    #[error("{endpoint} returned an undecodable body: {message}")]
    Decode { endpoint: Endpoint, message: String },
}

impl FetchError {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            FetchError::Timeout { endpoint }
            | FetchError::Network { endpoint, .. }
            | FetchError::Status { endpoint, .. }
            | FetchError::Decode { endpoint, .. } => *endpoint,
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            FetchError::Timeout { .. } | FetchError::Network { .. } => FailureKind::Network,
            FetchError::Status { .. } | FetchError::Decode { .. } => FailureKind::Protocol,
        }
    }

    pub(crate) fn from_transport(endpoint: Endpoint, err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout { endpoint }
        } else if err.is_decode() {
            FetchError::Decode {
                endpoint,
                message: err.to_string(),
            }
        } else {
            FetchError::Network {
                endpoint,
                message: err.to_string(),
            }
        }
    }
}

/// Failure report for one poll cycle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PollError {
    #[error("session fetch failed: {0}")]
    Session(FetchError),

    #[error("players fetch failed: {0}")]
    Players(FetchError),

    #[error("session and players fetch failed: {session}; {players}")]
    Both {
        session: FetchError,
        players: FetchError,
    },
}

impl PollError {
    /// Combine the per-endpoint outcomes of a cycle; `None` when both succeeded.
    pub fn from_parts(session: Option<FetchError>, players: Option<FetchError>) -> Option<Self> {
        match (session, players) {
            (None, None) => None,
            (Some(session), None) => Some(PollError::Session(session)),
            (None, Some(players)) => Some(PollError::Players(players)),
            (Some(session), Some(players)) => Some(PollError::Both { session, players }),
        }
    }

    /// First cause, session before players.
    pub fn primary(&self) -> &FetchError {
        match self {
            PollError::Session(err) | PollError::Players(err) => err,
            PollError::Both { session, .. } => session,
        }
    }

    pub fn causes(&self) -> Vec<&FetchError> {
        match self {
            PollError::Session(err) | PollError::Players(err) => vec![err],
            PollError::Both { session, players } => vec![session, players],
        }
    }

    /// Network if any cause is a network failure.
    pub fn kind(&self) -> FailureKind {
        if self
            .causes()
            .iter()
            .any(|err| err.kind() == FailureKind::Network)
        {
            FailureKind::Network
        } else {
            FailureKind::Protocol
        }
    }
}

/// The poller could not be started.
#[derive(Debug, Error)]
pub enum StartError {
    #[error("no tokio runtime is running on this thread: {0}")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),

    #[error(transparent)]
    InvalidSettings(#[from] ConfigError),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

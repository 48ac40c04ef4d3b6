//! Telemetry API seam and its HTTP implementation.

use async_trait::async_trait;
use racedash_telemetry_config::ClientSettings;
use racedash_telemetry_core::{Player, Session};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::trace;

use crate::error::{Endpoint, FetchError, StartError};

/// Source of session and player snapshots.
#[async_trait]
pub trait TelemetryApi: Send + Sync {
    async fn fetch_session(&self) -> Result<Session, FetchError>;

    async fn fetch_players(&self) -> Result<Vec<Player>, FetchError>;
}

/// `GET {api_base}/api/session` and `GET {api_base}/api/players` over reqwest.
#[derive(Debug, Clone)]
pub struct HttpTelemetryApi {
    client: Client,
    session_url: String,
    players_url: String,
}

impl HttpTelemetryApi {
    pub fn new(settings: &ClientSettings) -> Result<Self, StartError> {
        settings.validate()?;

        let client = Client::builder()
            .timeout(settings.request_timeout())
            .user_agent(concat!("racedash/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            session_url: settings.endpoint_url(Endpoint::Session.path()),
            players_url: settings.endpoint_url(Endpoint::Players.path()),
        })
    }

    pub fn url(&self, endpoint: Endpoint) -> &str {
        match endpoint {
            Endpoint::Session => &self.session_url,
            Endpoint::Players => &self.players_url,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T, FetchError> {
        let url = self.url(endpoint);
        trace!(%url, "Fetching telemetry");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| FetchError::from_transport(endpoint, &err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| FetchError::from_transport(endpoint, &err))?;

        serde_json::from_slice(&body).map_err(|err| FetchError::Decode {
            endpoint,
            message: err.to_string(),
        })
    }
}

#[async_trait]
impl TelemetryApi for HttpTelemetryApi {
    async fn fetch_session(&self) -> Result<Session, FetchError> {
        self.get_json(Endpoint::Session).await
    }

    async fn fetch_players(&self) -> Result<Vec<Player>, FetchError> {
        self.get_json(Endpoint::Players).await
    }
}

//! Poller client settings.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use url::Url;

pub const DEFAULT_SETTINGS_YAML: &str = include_str!("default_settings.yaml");

/// Environment variable that overrides [`ClientSettings::api_base`].
pub const API_BASE_ENV: &str = "RACEDASH_API_BASE";

pub const DEFAULT_API_BASE: &str = "http://localhost:8000";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 1000;
pub const DEFAULT_CANVAS_SIZE: f64 = 400.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings document: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// When the next poll cycle starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleMode {
    /// One interval after the previous cycle completed. Cycles never overlap.
    #[default]
    FixedDelay,
    /// Every interval on the clock, regardless of in-flight cycles.
    FixedRate,
}

/// How a cycle with one failed endpoint is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Apply whichever endpoint succeeded; report the other.
    #[default]
    Independent,
    /// Apply nothing unless both endpoints succeeded.
    AllOrNothing,
}

/// Settings for one telemetry client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientSettings {
    pub api_base: String,
    pub poll_interval_ms: u64,
    pub request_timeout_ms: u64,
    pub schedule: ScheduleMode,
    pub failure_policy: FailurePolicy,
    /// Side of the square track-map canvas, in pixels.
    pub canvas_size: f64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            schedule: ScheduleMode::default(),
            failure_policy: FailurePolicy::default(),
            canvas_size: DEFAULT_CANVAS_SIZE,
        }
    }
}

impl ClientSettings {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            ..Self::default()
        }
    }

    /// Parse and validate a YAML settings document.
    ///
    /// An empty or comment-only document yields the defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let blank = yaml.lines().all(|line| {
            let line = line.trim();
            line.is_empty() || line.starts_with('#')
        });

        let settings = if blank {
            Self::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Read, parse and validate a settings file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "Loaded settings file");
        Self::from_yaml_str(&yaml)
    }

    /// Apply overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_env_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable source.
    ///
    /// Only [`API_BASE_ENV`] is consulted; a blank value is ignored.
    pub fn with_env_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(api_base) = lookup(API_BASE_ENV) {
            let api_base = api_base.trim();
            if !api_base.is_empty() {
                debug!(api_base, "API base overridden from {API_BASE_ENV}");
                self.api_base = api_base.to_string();
            }
        }
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn with_poll_interval_ms(mut self, ms: u64) -> Self {
        self.poll_interval_ms = ms;
        self
    }

    pub fn with_request_timeout_ms(mut self, ms: u64) -> Self {
        self.request_timeout_ms = ms;
        self
    }

    pub fn with_schedule(mut self, schedule: ScheduleMode) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn with_canvas_size(mut self, canvas_size: f64) -> Self {
        self.canvas_size = canvas_size;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = self.api_base.trim();
        if base.is_empty() {
            return Err(ConfigError::invalid("api_base", "must not be empty"));
        }
        let url = Url::parse(base)
            .map_err(|err| ConfigError::invalid("api_base", format!("not a valid URL: {err}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::invalid(
                "api_base",
                format!("unsupported scheme `{}`, expected http or https", url.scheme()),
            ));
        }
        if url.host_str().is_none_or(str::is_empty) {
            return Err(ConfigError::invalid("api_base", "missing host"));
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::invalid("poll_interval_ms", "must be > 0"));
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::invalid("request_timeout_ms", "must be > 0"));
        }
        if !self.canvas_size.is_finite() || self.canvas_size <= 0.0 {
            return Err(ConfigError::invalid(
                "canvas_size",
                format!("must be a positive number, got {}", self.canvas_size),
            ));
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Absolute URL of an API path; a trailing slash on the base is ignored.
    ///
    /// ```
    /// use racedash_telemetry_config::ClientSettings;
    ///
    /// let settings = ClientSettings::new("http://pitwall:8000/");
    /// assert_eq!(settings.endpoint_url("/api/players"), "http://pitwall:8000/api/players");
    /// ```
    pub fn endpoint_url(&self, path: &str) -> String {
        let base = self.api_base.trim().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

/// Settings decoded from [`DEFAULT_SETTINGS_YAML`].
pub fn load_default_settings() -> Result<ClientSettings, ConfigError> {
    ClientSettings::from_yaml_str(DEFAULT_SETTINGS_YAML)
}

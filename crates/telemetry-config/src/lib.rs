//! Client settings for the racedash telemetry poller.
//!
//! Settings come from three layers, later ones winning: built-in defaults
//! (also shipped as [`DEFAULT_SETTINGS_YAML`]), an optional YAML file, and the
//! `RACEDASH_API_BASE` environment variable.

#![deny(static_mut_refs)]

pub mod settings;

pub use settings::{
    API_BASE_ENV, ClientSettings, ConfigError, DEFAULT_SETTINGS_YAML, FailurePolicy, ScheduleMode,
    load_default_settings,
};

//! Configuration management for the avatar booking backend
//!
//! Supports loading configuration from:
//! - YAML/TOML files (`config/default.*`, `config/{env}.*`)
//! - Environment variables (AVATAR_BOOKING prefix, `__` separator)
//! - Legacy deployment variables (`AVATAR_CDN_URL`, `NGROK_URL`, `SARVAM_*`)

pub mod avatar;
pub mod constants;
pub mod settings;

pub use avatar::AvatarConfig;
pub use settings::{
    load_settings, load_settings_from, ObservabilityConfig, RuntimeEnvironment, ServerConfig,
    ServicesConfig, Settings,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

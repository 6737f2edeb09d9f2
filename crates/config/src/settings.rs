//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::constants::{env, server, services};
use crate::{AvatarConfig, ConfigError};

/// Runtime environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    /// Development mode - relaxed validation, warnings only
    #[default]
    Development,
    /// Staging mode - stricter validation
    Staging,
    /// Production mode - all validations enforced
    Production,
}

impl RuntimeEnvironment {
    /// Check if strict validation should be applied
    pub fn is_strict(&self) -> bool {
        matches!(self, Self::Production | Self::Staging)
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Avatar video hosting
    #[serde(default)]
    pub avatar: AvatarConfig,

    /// Translation and speech services
    #[serde(default)]
    pub services: ServicesConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_services()?;
        Ok(())
    }

    /// Base URL the avatar video URLs are built on
    pub fn video_base_url(&self) -> String {
        self.avatar.video_base_url(self.server.port)
    }

    fn validate_server(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                message: "Port cannot be 0".to_string(),
            });
        }

        if self.server.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.timeout_seconds".to_string(),
                message: "Timeout must be at least 1 second".to_string(),
            });
        }

        Ok(())
    }

    fn validate_services(&self) -> Result<(), ConfigError> {
        let services = &self.services;

        if services.translate_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "services.translate_timeout_ms".to_string(),
                message: "Timeout must be positive".to_string(),
            });
        }

        if services.tts_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "services.tts_timeout_ms".to_string(),
                message: "Timeout must be positive".to_string(),
            });
        }

        for (field, url) in [
            ("services.translate_url", &services.translate_url),
            ("services.tts_url", &services.tts_url),
        ] {
            if let Some(url) = url {
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    return Err(ConfigError::InvalidValue {
                        field: field.to_string(),
                        message: format!("Must be an http(s) URL, got '{}'", url),
                    });
                }
            }
        }

        let endpoints_configured =
            services.translate_url.is_some() || services.tts_url.is_some();
        if endpoints_configured && services.api_key.is_none() {
            if self.environment.is_strict() {
                return Err(ConfigError::InvalidValue {
                    field: "services.api_key".to_string(),
                    message: "API key must be set when service endpoints are configured"
                        .to_string(),
                });
            }
            tracing::warn!("Service endpoints configured without an API key");
        }

        Ok(())
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_host() -> String {
    server::DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    server::DEFAULT_PORT
}
fn default_timeout() -> u64 {
    server::DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Sarvam AI translation and text-to-speech settings
///
/// Without endpoints the backend runs with pass-through services: Hindi
/// chatbot replies fall back to English and speech returns no audio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServicesConfig {
    /// Bearer token (SARVAM_API_KEY)
    #[serde(default = "default_api_key")]
    pub api_key: Option<String>,

    /// Translation endpoint (SARVAM_TRANSLATE_URL)
    #[serde(default = "default_translate_url")]
    pub translate_url: Option<String>,

    /// Text-to-speech endpoint (SARVAM_TTS_URL)
    #[serde(default = "default_tts_url")]
    pub tts_url: Option<String>,

    #[serde(default = "default_translate_timeout")]
    pub translate_timeout_ms: u64,

    #[serde(default = "default_tts_timeout")]
    pub tts_timeout_ms: u64,

    #[serde(default = "default_translation_model")]
    pub translation_model: String,

    #[serde(default = "default_tts_model")]
    pub tts_model: String,

    #[serde(default = "default_tts_speaker")]
    pub tts_speaker: String,
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn default_api_key() -> Option<String> {
    env_value(env::SARVAM_API_KEY)
}
fn default_translate_url() -> Option<String> {
    env_value(env::SARVAM_TRANSLATE_URL)
}
fn default_tts_url() -> Option<String> {
    env_value(env::SARVAM_TTS_URL)
}
fn default_translate_timeout() -> u64 {
    services::TRANSLATE_TIMEOUT_MS
}
fn default_tts_timeout() -> u64 {
    services::TTS_TIMEOUT_MS
}
fn default_translation_model() -> String {
    services::TRANSLATION_MODEL.to_string()
}
fn default_tts_model() -> String {
    services::TTS_MODEL.to_string()
}
fn default_tts_speaker() -> String {
    services::TTS_SPEAKER.to_string()
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            api_key: default_api_key(),
            translate_url: default_translate_url(),
            tts_url: default_tts_url(),
            translate_timeout_ms: default_translate_timeout(),
            tts_timeout_ms: default_tts_timeout(),
            translation_model: default_translation_model(),
            tts_model: default_tts_model(),
            tts_speaker: default_tts_speaker(),
        }
    }
}

impl ServicesConfig {
    pub fn translate_timeout(&self) -> Duration {
        Duration::from_millis(self.translate_timeout_ms)
    }

    pub fn tts_timeout(&self) -> Duration {
        Duration::from_millis(self.tts_timeout_ms)
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub log_json: bool,

    /// Expose Prometheus metrics at /metrics
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_true() -> bool {
    true
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
            metrics_enabled: true,
        }
    }
}

/// Load settings from `config/` and the environment
///
/// Priority (highest to lowest):
/// 1. Environment variables (AVATAR_BOOKING prefix)
/// 2. config/{env}.yaml (if env specified)
/// 3. config/default.yaml
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    load_settings_from(Path::new("config"), env)
}

/// Load settings from an explicit config directory
pub fn load_settings_from(config_dir: &Path, env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    let default_path = config_dir.join("default");
    builder = builder.add_source(File::with_name(&default_path.to_string_lossy()).required(false));

    if let Some(env_name) = env {
        let env_path = config_dir.join(env_name);
        builder =
            builder.add_source(File::with_name(&env_path.to_string_lossy()).required(false));
    }

    builder = builder.add_source(
        Environment::with_prefix("AVATAR_BOOKING")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 8000);
        assert_eq!(settings.services.translate_timeout_ms, 10_000);
        assert_eq!(settings.services.tts_timeout_ms, 15_000);
        assert!(settings.observability.metrics_enabled);
    }

    #[test]
    fn test_server_validation() {
        let mut settings = Settings::default();

        settings.server.port = 0;
        assert!(settings.validate_server().is_err());
        settings.server.port = 8000;

        settings.server.timeout_seconds = 0;
        assert!(settings.validate_server().is_err());
        settings.server.timeout_seconds = 30;

        assert!(settings.validate_server().is_ok());
    }

    #[test]
    fn test_service_url_validation() {
        let mut settings = Settings::default();
        settings.services.api_key = Some("key".to_string());

        settings.services.translate_url = Some("api.sarvam.ai/translate".to_string());
        assert!(settings.validate_services().is_err());

        settings.services.translate_url = Some("https://api.sarvam.ai/translate".to_string());
        assert!(settings.validate_services().is_ok());

        settings.services.tts_timeout_ms = 0;
        assert!(settings.validate_services().is_err());
    }

    #[test]
    fn test_production_requires_api_key() {
        let mut settings = Settings::default();
        settings.environment = RuntimeEnvironment::Production;
        settings.services.api_key = None;
        settings.services.tts_url = Some("https://api.sarvam.ai/text-to-speech".to_string());
        assert!(settings.validate_services().is_err());

        settings.services.api_key = Some("secret".to_string());
        assert!(settings.validate_services().is_ok());
    }

    #[test]
    fn test_load_settings_from_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("default.yaml"),
            "server:\n  port: 9100\navatar:\n  public_url: \"https://demo.ngrok.app\"\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("staging.yaml"),
            "observability:\n  log_level: debug\n",
        )
        .unwrap();

        let settings = load_settings_from(dir.path(), Some("staging")).unwrap();
        assert_eq!(settings.server.port, 9100);
        assert_eq!(settings.observability.log_level, "debug");
        assert_eq!(settings.video_base_url(), "https://demo.ngrok.app/videos");
    }

    #[test]
    fn test_settings_serialize() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(json["environment"], "development");
        assert_eq!(json["server"]["port"], 8000);
    }
}

//! Translation and speech service clients
//!
//! Backed by the Sarvam AI HTTP APIs (`mayura` translation, `bulbul` TTS).
//! When an endpoint is not configured the no-op implementations from
//! `avatar-core` are used, which makes every call fall back.

mod sarvam;

pub use sarvam::SarvamClient;

use avatar_config::constants::services;
use avatar_core::{NoopSynthesizer, NoopTranslator, SpeechSynthesizer, Translator};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Sarvam client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SarvamConfig {
    /// Bearer token
    pub api_key: Option<String>,
    /// Translation endpoint
    pub translate_url: Option<String>,
    /// Text-to-speech endpoint
    pub tts_url: Option<String>,
    /// Per-request translation timeout
    pub translate_timeout: Duration,
    /// Per-request TTS timeout
    pub tts_timeout: Duration,
    pub translation_model: String,
    pub tts_model: String,
    pub tts_speaker: String,
    pub tts_sample_rate: u32,
}

impl Default for SarvamConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            translate_url: None,
            tts_url: None,
            translate_timeout: Duration::from_millis(services::TRANSLATE_TIMEOUT_MS),
            tts_timeout: Duration::from_millis(services::TTS_TIMEOUT_MS),
            translation_model: services::TRANSLATION_MODEL.to_string(),
            tts_model: services::TTS_MODEL.to_string(),
            tts_speaker: services::TTS_SPEAKER.to_string(),
            tts_sample_rate: services::TTS_SAMPLE_RATE,
        }
    }
}

/// Create translator based on config
pub fn create_translator(config: &SarvamConfig) -> Arc<dyn Translator> {
    if config.translate_url.is_none() {
        tracing::info!("No translation endpoint configured, using pass-through translator");
        return Arc::new(NoopTranslator::new());
    }

    match SarvamClient::new(config.clone()) {
        Ok(client) => {
            tracing::info!("Using Sarvam translator");
            Arc::new(client)
        },
        Err(e) => {
            tracing::warn!(error = %e, "Failed to build Sarvam client, translation disabled");
            Arc::new(NoopTranslator::new())
        },
    }
}

/// Create speech synthesizer based on config
pub fn create_synthesizer(config: &SarvamConfig) -> Arc<dyn SpeechSynthesizer> {
    if config.tts_url.is_none() {
        tracing::info!("No TTS endpoint configured, speech synthesis disabled");
        return Arc::new(NoopSynthesizer::new());
    }

    match SarvamClient::new(config.clone()) {
        Ok(client) => {
            tracing::info!(speaker = %config.tts_speaker, "Using Sarvam speech synthesis");
            Arc::new(client)
        },
        Err(e) => {
            tracing::warn!(error = %e, "Failed to build Sarvam client, speech disabled");
            Arc::new(NoopSynthesizer::new())
        },
    }
}

//! Application State
//!
//! Shared state across all handlers.

use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use avatar_config::{load_settings_from, Settings};
use avatar_core::{Language, SpeechSynthesizer, Translator};
use avatar_flow::{ChatbotResponder, VideoUrlResolver};
use avatar_text_processing::{create_synthesizer, create_translator, IntentClassifier, SarvamConfig};

use crate::session::{InMemorySessionStore, Session, SessionStore};
use crate::ServerError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    /// Configuration, reloadable at runtime
    pub config: Arc<RwLock<Settings>>,
    /// Session storage
    pub sessions: Arc<dyn SessionStore>,
    /// Avatar clip URLs, fixed at startup
    pub videos: Arc<VideoUrlResolver>,
    /// Generic chatbot and flow trigger detection
    pub chatbot: Arc<ChatbotResponder>,
    pub translator: Arc<dyn Translator>,
    pub synthesizer: Arc<dyn SpeechSynthesizer>,
    /// Environment name for config reload
    env: Option<String>,
    /// Directory holding `default.*` and `{env}.*`
    config_dir: PathBuf,
}

/// Sarvam client settings derived from the service config
pub fn sarvam_config(settings: &Settings) -> SarvamConfig {
    let services = &settings.services;
    SarvamConfig {
        api_key: services.api_key.clone(),
        translate_url: services.translate_url.clone(),
        tts_url: services.tts_url.clone(),
        translate_timeout: services.translate_timeout(),
        tts_timeout: services.tts_timeout(),
        translation_model: services.translation_model.clone(),
        tts_model: services.tts_model.clone(),
        tts_speaker: services.tts_speaker.clone(),
        ..SarvamConfig::default()
    }
}

impl AppState {
    /// Create application state with the configured services and an
    /// in-memory session store
    pub fn new(config: Settings) -> Self {
        let sarvam = sarvam_config(&config);
        let translator = create_translator(&sarvam);
        let synthesizer = create_synthesizer(&sarvam);
        Self::with_services(config, Arc::new(InMemorySessionStore::new()), translator, synthesizer)
    }

    /// Create application state with environment name for reload support
    pub fn with_env(config: Settings, env: Option<String>) -> Self {
        let mut state = Self::new(config);
        state.env = env;
        state
    }

    /// Create application state with explicit collaborators
    pub fn with_services(
        config: Settings,
        sessions: Arc<dyn SessionStore>,
        translator: Arc<dyn Translator>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
    ) -> Self {
        let base_url = config.video_base_url();
        tracing::info!(base_url = %base_url, "Serving avatar videos");

        let chatbot = ChatbotResponder::new(IntentClassifier::new(), translator.clone());

        Self {
            config: Arc::new(RwLock::new(config)),
            sessions,
            videos: Arc::new(VideoUrlResolver::new(base_url)),
            chatbot: Arc::new(chatbot),
            translator,
            synthesizer,
            env: None,
            config_dir: PathBuf::from("config"),
        }
    }

    /// Reload from `dir` instead of `./config`
    pub fn with_config_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config_dir = dir.into();
        self
    }

    /// Reload configuration from files
    ///
    /// Translation and TTS timeouts apply from the next request. The request
    /// timeout layer, log filter, video base URL and service clients keep
    /// their startup values until restart.
    pub fn reload_config(&self) -> Result<(), String> {
        let new_config = load_settings_from(&self.config_dir, self.env.as_deref())
            .map_err(|e| format!("Failed to reload config: {}", e))?;

        *self.config.write() = new_config;

        tracing::info!("Configuration reloaded successfully");
        Ok(())
    }

    pub fn translate_timeout(&self) -> Duration {
        self.config.read().services.translate_timeout()
    }

    pub fn tts_timeout(&self) -> Duration {
        self.config.read().services.tts_timeout()
    }

    /// Fetch a session, failing with `SessionNotFound`
    pub async fn session(&self, id: &str) -> Result<Arc<Session>, ServerError> {
        self.sessions
            .get(id)
            .await?
            .ok_or_else(|| ServerError::SessionNotFound(id.to_string()))
    }

    /// Fetch a session, creating it on first contact
    pub async fn session_or_create(
        &self,
        id: &str,
        language: Language,
    ) -> Result<Arc<Session>, ServerError> {
        if let Some(session) = self.sessions.get(id).await? {
            return Ok(session);
        }
        let session = Arc::new(Session::new(id, language, self.videos.clone()));
        self.sessions.get_or_insert(session).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use avatar_core::{NoopSynthesizer, Result};
    use avatar_flow::ChatReply;

    struct SlowTranslator;

    #[async_trait]
    impl Translator for SlowTranslator {
        async fn translate(&self, text: &str, _from: Language, _to: Language) -> Result<String> {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok(text.to_uppercase())
        }

        fn name(&self) -> &str {
            "slow"
        }
    }

    fn state_with_timeout(dir: &std::path::Path, translate_timeout_ms: u64) -> AppState {
        let mut settings = Settings::default();
        settings.avatar.detect_local_ip = false;
        settings.services.translate_timeout_ms = translate_timeout_ms;
        AppState::with_services(
            settings,
            Arc::new(InMemorySessionStore::new()),
            Arc::new(SlowTranslator),
            Arc::new(NoopSynthesizer::new()),
        )
        .with_config_dir(dir)
    }

    #[tokio::test]
    async fn test_reload_applies_translate_timeout() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("default.yaml"),
            "avatar:\n  detect_local_ip: false\nservices:\n  translate_timeout_ms: 5000\n  tts_timeout_ms: 7000\n",
        )
        .unwrap();

        let state = state_with_timeout(dir.path(), 10);
        let reply = state
            .chatbot
            .respond("hello", Language::Hindi, 1, false, state.translate_timeout())
            .await;
        assert!(matches!(reply, ChatReply::Canned { fallback_used: true, .. }));

        state.reload_config().unwrap();
        assert_eq!(state.translate_timeout(), Duration::from_millis(5000));
        assert_eq!(state.tts_timeout(), Duration::from_millis(7000));

        let reply = state
            .chatbot
            .respond("hello", Language::Hindi, 1, false, state.translate_timeout())
            .await;
        assert!(matches!(reply, ChatReply::Canned { fallback_used: false, .. }));
    }

    #[test]
    fn test_failed_reload_keeps_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("default.yaml"), "server:\n  port: 0\n").unwrap();

        let state = state_with_timeout(dir.path(), 10);
        assert!(state.reload_config().is_err());
        assert_eq!(state.translate_timeout(), Duration::from_millis(10));
    }
}

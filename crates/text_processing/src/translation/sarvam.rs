//! Sarvam AI translation and text-to-speech client

use async_trait::async_trait;
use avatar_config::constants::services;
use avatar_core::{Error, Language, Result, SpeechSynthesizer, Translator};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::SarvamConfig;

/// Translation request body
#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    input: &'a str,
    source_language_code: &'static str,
    target_language_code: &'static str,
    speaker_gender: &'static str,
    mode: &'static str,
    model: &'a str,
    enable_preprocessing: bool,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    translated_text: Option<String>,
}

/// Text-to-speech request body
#[derive(Debug, Serialize)]
struct TtsRequest<'a> {
    inputs: Vec<&'a str>,
    target_language_code: &'static str,
    speaker: &'a str,
    pitch: f32,
    pace: f32,
    loudness: f32,
    speech_sample_rate: u32,
    enable_preprocessing: bool,
    model: &'a str,
}

#[derive(Debug, Deserialize)]
struct TtsResponse {
    #[serde(default)]
    audios: Vec<String>,
}

/// Client for the hosted Sarvam AI APIs
///
/// Timeouts are applied per request, so one client serves both the
/// translation and the speech budget.
#[derive(Clone)]
pub struct SarvamClient {
    client: Client,
    config: SarvamConfig,
}

impl SarvamClient {
    pub fn new(config: SarvamConfig) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| Error::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &SarvamConfig {
        &self.config
    }

    fn translate_request<'a>(&'a self, text: &'a str, from: Language, to: Language) -> TranslateRequest<'a> {
        TranslateRequest {
            input: text,
            source_language_code: from.locale(),
            target_language_code: to.locale(),
            speaker_gender: services::TRANSLATION_SPEAKER_GENDER,
            mode: services::TRANSLATION_MODE,
            model: &self.config.translation_model,
            enable_preprocessing: true,
        }
    }

    fn tts_request<'a>(&'a self, text: &'a str, language: Language) -> TtsRequest<'a> {
        TtsRequest {
            inputs: vec![text],
            target_language_code: language.locale(),
            speaker: &self.config.tts_speaker,
            pitch: 0.0,
            pace: 1.0,
            loudness: 1.0,
            speech_sample_rate: self.config.tts_sample_rate,
            enable_preprocessing: true,
            model: &self.config.tts_model,
        }
    }

    async fn post<B: Serialize, R: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        body: &B,
        timeout: std::time::Duration,
    ) -> Result<R> {
        let mut request = self.client.post(url).timeout(timeout).json(body);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| Error::Translation(format!("Invalid response: {}", e)))
    }
}

#[async_trait]
impl Translator for SarvamClient {
    async fn translate(&self, text: &str, from: Language, to: Language) -> Result<String> {
        if from == to || text.trim().is_empty() {
            return Ok(text.to_string());
        }

        let url = self
            .config
            .translate_url
            .as_deref()
            .ok_or_else(|| Error::NotConfigured("translation".to_string()))?;

        let request = self.translate_request(text, from, to);
        let response: TranslateResponse =
            self.post(url, &request, self.config.translate_timeout).await?;

        response
            .translated_text
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::Translation("Response carried no translated_text".to_string()))
    }

    fn name(&self) -> &str {
        "sarvam"
    }
}

#[async_trait]
impl SpeechSynthesizer for SarvamClient {
    async fn synthesize(&self, text: &str, language: Language) -> Result<Option<String>> {
        if text.trim().is_empty() {
            return Err(Error::InvalidInput("Text must not be empty".to_string()));
        }

        let url = self
            .config
            .tts_url
            .as_deref()
            .ok_or_else(|| Error::NotConfigured("speech synthesis".to_string()))?;

        let request = self.tts_request(text, language);
        let response: TtsResponse = self.post(url, &request, self.config.tts_timeout).await?;

        Ok(response.audios.into_iter().next())
    }

    fn name(&self) -> &str {
        "sarvam"
    }
}

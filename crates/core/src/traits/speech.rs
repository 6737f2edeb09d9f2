//! Translation and speech synthesis traits

use crate::{Error, Language, Result};
use async_trait::async_trait;

/// Translation interface
///
/// Implementations:
/// - `SarvamClient` - hosted Indic translation API
/// - `NoopTranslator` - pass-through when no service is configured
///
/// # Example
///
/// ```ignore
/// let translator: Arc<dyn Translator> = Arc::new(SarvamClient::new(config)?);
/// let hindi = translator
///     .translate("How can I help you today?", Language::English, Language::Hindi)
///     .await?;
/// ```
#[async_trait]
pub trait Translator: Send + Sync + 'static {
    /// Translate text between languages
    async fn translate(&self, text: &str, from: Language, to: Language) -> Result<String>;

    /// Provider name for logging
    fn name(&self) -> &str;
}

/// Text-to-speech interface
///
/// Returns a provider-specific audio handle (base64 payload or URL), or
/// `None` when the provider produced nothing.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync + 'static {
    /// Synthesize speech for text in the given language
    async fn synthesize(&self, text: &str, language: Language) -> Result<Option<String>>;

    /// Provider name for logging
    fn name(&self) -> &str;
}

/// Translator used when no translation service is configured
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTranslator;

impl NoopTranslator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Translator for NoopTranslator {
    async fn translate(&self, text: &str, from: Language, to: Language) -> Result<String> {
        if from == to {
            return Ok(text.to_string());
        }
        Err(Error::NotConfigured("translation".to_string()))
    }

    fn name(&self) -> &str {
        "noop"
    }
}

/// Speech synthesizer used when no TTS service is configured
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSynthesizer;

impl NoopSynthesizer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SpeechSynthesizer for NoopSynthesizer {
    async fn synthesize(&self, _text: &str, _language: Language) -> Result<Option<String>> {
        Err(Error::NotConfigured("speech synthesis".to_string()))
    }

    fn name(&self) -> &str {
        "noop"
    }
}

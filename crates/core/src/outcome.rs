//! Fail-soft service outcomes
//!
//! Translation and speech calls never escalate to the user. A failure, or a
//! call that outlives its timeout, degrades to a fallback value. The outcome
//! keeps track of which path was taken so callers and tests can tell a live
//! answer from a degraded one.

use serde::Serialize;
use std::time::Duration;

use crate::{Language, SpeechSynthesizer, Translator};

/// Why a fallback value was used
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum FallbackReason {
    /// The call did not finish within its budget
    Timeout,
    /// The service returned an error
    Failed(String),
}

/// Result of a fail-soft service call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceOutcome<T> {
    /// The service answered
    Served(T),
    /// The service failed and the fallback value was used
    Fallback { value: T, reason: FallbackReason },
}

impl<T> ServiceOutcome<T> {
    /// The value, whichever path produced it
    pub fn value(&self) -> &T {
        match self {
            Self::Served(value) => value,
            Self::Fallback { value, .. } => value,
        }
    }

    /// Consume the outcome and return the value
    pub fn into_value(self) -> T {
        match self {
            Self::Served(value) => value,
            Self::Fallback { value, .. } => value,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    pub fn fallback_reason(&self) -> Option<&FallbackReason> {
        match self {
            Self::Served(_) => None,
            Self::Fallback { reason, .. } => Some(reason),
        }
    }
}

/// Translate `text`, falling back to the untranslated text on any failure
pub async fn translate_or_fallback(
    translator: &dyn Translator,
    text: &str,
    from: Language,
    to: Language,
    timeout: Duration,
) -> ServiceOutcome<String> {
    if from == to {
        return ServiceOutcome::Served(text.to_string());
    }

    match tokio::time::timeout(timeout, translator.translate(text, from, to)).await {
        Ok(Ok(translated)) => ServiceOutcome::Served(translated),
        Ok(Err(e)) => {
            tracing::warn!(
                provider = translator.name(),
                from = %from,
                to = %to,
                error = %e,
                "Translation failed, using untranslated text"
            );
            ServiceOutcome::Fallback {
                value: text.to_string(),
                reason: FallbackReason::Failed(e.to_string()),
            }
        },
        Err(_) => {
            tracing::warn!(
                provider = translator.name(),
                timeout_ms = timeout.as_millis() as u64,
                "Translation timed out, using untranslated text"
            );
            ServiceOutcome::Fallback {
                value: text.to_string(),
                reason: FallbackReason::Timeout,
            }
        },
    }
}

/// Synthesize speech, falling back to no audio on any failure
pub async fn synthesize_or_none(
    synthesizer: &dyn SpeechSynthesizer,
    text: &str,
    language: Language,
    timeout: Duration,
) -> ServiceOutcome<Option<String>> {
    match tokio::time::timeout(timeout, synthesizer.synthesize(text, language)).await {
        Ok(Ok(audio)) => ServiceOutcome::Served(audio),
        Ok(Err(e)) => {
            tracing::warn!(
                provider = synthesizer.name(),
                language = %language,
                error = %e,
                "Speech synthesis failed"
            );
            ServiceOutcome::Fallback {
                value: None,
                reason: FallbackReason::Failed(e.to_string()),
            }
        },
        Err(_) => {
            tracing::warn!(
                provider = synthesizer.name(),
                timeout_ms = timeout.as_millis() as u64,
                "Speech synthesis timed out"
            );
            ServiceOutcome::Fallback {
                value: None,
                reason: FallbackReason::Timeout,
            }
        },
    }
}

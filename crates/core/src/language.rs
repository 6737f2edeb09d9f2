//! Language definitions
//!
//! The avatar scripts are recorded in English and Hindi. English is the
//! baseline: anything that cannot be resolved falls back to it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported conversation languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Language {
    #[default]
    #[serde(rename = "en", alias = "english")]
    English,
    #[serde(rename = "hi", alias = "hindi")]
    Hindi,
}

impl Language {
    /// All supported languages
    pub const ALL: [Language; 2] = [Language::English, Language::Hindi];

    /// ISO 639-1 code
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Hindi => "hi",
        }
    }

    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Hindi => "Hindi",
        }
    }

    /// BCP-47 locale code used by the Indic speech/translation services
    pub fn locale(&self) -> &'static str {
        match self {
            Self::English => "en-IN",
            Self::Hindi => "hi-IN",
        }
    }

    /// Is this the baseline language (no translation needed)
    pub fn is_default(&self) -> bool {
        matches!(self, Self::English)
    }

    /// Parse a language from a code, locale or name (case-insensitive)
    pub fn from_str_loose(s: &str) -> Option<Self> {
        let normalized = s.trim().to_lowercase();
        let primary = normalized
            .split(|c| c == '-' || c == '_')
            .next()
            .unwrap_or_default();

        match primary {
            "en" | "eng" | "english" => Some(Self::English),
            "hi" | "hin" | "hindi" => Some(Self::Hindi),
            _ => None,
        }
    }

    /// Resolve a request language, falling back to the baseline language
    pub fn resolve(s: &str) -> Self {
        Self::from_str_loose(s).unwrap_or_else(|| {
            if !s.trim().is_empty() {
                tracing::debug!(language = %s, "Unrecognised language, using English");
            }
            Self::default()
        })
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

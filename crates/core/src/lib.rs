//! Core traits and types for the avatar booking backend
//!
//! This crate provides foundational types used across all other crates:
//! - Language definitions (English baseline + Hindi)
//! - Error types
//! - Traits for the external translation and speech services
//! - Fail-soft service outcomes

pub mod error;
pub mod language;
pub mod outcome;
pub mod traits;

pub use error::{Error, Result};
pub use language::Language;
pub use outcome::{synthesize_or_none, translate_or_fallback, FallbackReason, ServiceOutcome};
pub use traits::{NoopSynthesizer, NoopTranslator, SpeechSynthesizer, Translator};

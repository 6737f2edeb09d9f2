//! Core traits for the external service boundary
//!
//! The backend talks to two collaborators it does not own:
//!
//! ```text
//! Translation:
//!   - Translator: text, source, target → translated text
//!
//! Speech:
//!   - SpeechSynthesizer: text, language → audio handle (or none)
//! ```
//!
//! Both are expected to fail; callers go through the fail-soft helpers in
//! [`crate::outcome`] rather than calling them directly.

mod speech;

pub use speech::{NoopSynthesizer, NoopTranslator, SpeechSynthesizer, Translator};

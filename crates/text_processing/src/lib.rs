//! Text Processing for the Avatar Booking Backend
//!
//! This crate provides:
//! - **Intent Detection**: keyword triggers that hand a chat over to the
//!   booking or check-in flow
//! - **Translation / Speech**: clients for the hosted Indic translation and
//!   text-to-speech services
//!
//! # Example
//!
//! ```
//! use avatar_text_processing::intent::{FlowIntent, IntentClassifier};
//!
//! let classifier = IntentClassifier::new();
//! assert_eq!(classifier.classify("I want to book a flight"), FlowIntent::StartBooking);
//! ```

pub mod intent;
pub mod translation;

pub use intent::{FlowIntent, IntentClassifier, IntentMatch};
pub use translation::{create_synthesizer, create_translator, SarvamClient, SarvamConfig};

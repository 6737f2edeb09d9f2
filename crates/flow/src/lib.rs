//! Avatar-guided flows
//!
//! Features:
//! - Static booking and check-in step sequences
//! - English/Hindi narration per step
//! - Avatar video URL resolution
//! - One generic step processor, parametrized per flow
//! - Turn-indexed chatbot replies ahead of a flow

pub mod chatbot;
pub mod definition;
pub mod messages;
pub mod processor;
pub mod response;
pub mod video;

pub use chatbot::{ChatReply, ChatbotResponder, TurnCounter};
pub use definition::{FlowDefinition, FlowKind, TERMINAL_STEP};
pub use processor::{
    BookingFlow, BookingProcessor, CheckInFlow, CheckInProcessor, FlightOffer, FlowData,
    FlowSpec, FlowSummary, StepDetails, StepOutcome, StepProcessor, StepResult, StepStart,
    ValidationFailure,
};
pub use response::FlowResponse;
pub use video::VideoUrlResolver;

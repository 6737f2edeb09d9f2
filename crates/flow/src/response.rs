//! Outbound message shapes
//!
//! Every reply the avatar client receives is one variant of [`FlowResponse`],
//! discriminated by the `type` field.

use serde::Serialize;

use crate::processor::{StepOutcome, StepResult, StepStart, ValidationFailure};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FlowResponse {
    ChatbotResponse {
        session_id: String,
        message: String,
        show_quick_actions: bool,
        fallback_used: bool,
    },
    FlowTrigger {
        session_id: String,
        trigger_message: String,
        #[serde(flatten)]
        start: StepStart,
    },
    FlowStep {
        session_id: String,
        #[serde(flatten)]
        result: StepResult,
    },
    ValidationError {
        session_id: String,
        #[serde(flatten)]
        failure: ValidationFailure,
    },
    FlowComplete {
        session_id: String,
        #[serde(flatten)]
        result: StepResult,
    },
}

impl FlowResponse {
    /// Wrap a processor outcome, picking the variant from its state
    pub fn from_outcome(session_id: impl Into<String>, outcome: StepOutcome) -> Self {
        let session_id = session_id.into();
        match outcome {
            StepOutcome::Rejected(failure) => FlowResponse::ValidationError { session_id, failure },
            StepOutcome::Advanced(result) if result.completed => {
                FlowResponse::FlowComplete { session_id, result }
            },
            StepOutcome::Advanced(result) => FlowResponse::FlowStep { session_id, result },
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            FlowResponse::ChatbotResponse { .. } => "chatbot_response",
            FlowResponse::FlowTrigger { .. } => "flow_trigger",
            FlowResponse::FlowStep { .. } => "flow_step",
            FlowResponse::ValidationError { .. } => "validation_error",
            FlowResponse::FlowComplete { .. } => "flow_complete",
        }
    }
}

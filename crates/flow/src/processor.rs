//! Step processing
//!
//! [`StepProcessor`] implements the progression shared by every flow:
//! record input, validate, advance, branch, then narrate the new step.
//! Flow-specific behavior plugs in through [`FlowSpec`].

use avatar_core::Language;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::definition::{is_terminal, FlowDefinition, FlowKind, TERMINAL_STEP};
use crate::messages;
use crate::video::VideoUrlResolver;

/// Input collected so far, keyed by the step that received it
pub type FlowData = BTreeMap<String, Value>;

/// Check-in steps whose input must be present for check-in to succeed
const CHECK_IN_REQUIRED: &[&str] = &[
    "pnr_collection",
    "lastname_collection",
    "mobile_collection",
    "email_collection",
];

const PNR_LENGTH: usize = 6;

/// Dummy flight search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlightOffer {
    pub flight_number: &'static str,
    pub departure: &'static str,
    pub arrival: &'static str,
    pub duration: &'static str,
    pub price: &'static str,
}

pub fn dummy_flights() -> Vec<FlightOffer> {
    vec![
        FlightOffer {
            flight_number: "6E-123",
            departure: "06:00",
            arrival: "08:30",
            duration: "2h 30m",
            price: "₹4,500",
        },
        FlightOffer {
            flight_number: "6E-456",
            departure: "14:15",
            arrival: "16:45",
            duration: "2h 30m",
            price: "₹5,200",
        },
        FlightOffer {
            flight_number: "6E-789",
            departure: "20:30",
            arrival: "23:00",
            duration: "2h 30m",
            price: "₹4,800",
        },
    ]
}

/// Per-step extras carried next to the narration
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StepDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flights: Option<Vec<FlightOffer>>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub requires_confirmation: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
}

/// First step of a freshly started flow
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepStart {
    pub flow: FlowKind,
    pub step: &'static str,
    pub message: String,
    pub video_url: Option<String>,
    pub next_step: &'static str,
    pub show_input: bool,
}

/// Result of advancing a flow
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepResult {
    pub flow: FlowKind,
    pub step: &'static str,
    /// `None` at the terminal step
    pub next_step: Option<&'static str>,
    pub message: String,
    pub video_url: Option<String>,
    pub data: FlowData,
    /// The flow has nothing left to collect
    pub completed: bool,
    #[serde(flatten)]
    pub details: StepDetails,
}

/// Input rejected for the submitted step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationFailure {
    pub flow: FlowKind,
    pub step: String,
    pub message: String,
    pub video_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    Advanced(StepResult),
    Rejected(ValidationFailure),
}

impl StepOutcome {
    pub fn is_rejected(&self) -> bool {
        matches!(self, StepOutcome::Rejected(_))
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, StepOutcome::Advanced(result) if result.completed)
    }
}

/// Flow progress snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowSummary {
    pub flow: FlowKind,
    pub current_step: Option<&'static str>,
    pub data: FlowData,
    pub progress: u8,
}

/// Flow-specific hooks for [`StepProcessor`]
pub trait FlowSpec: Send + Sync + Default {
    fn definition(&self) -> &'static FlowDefinition;

    /// Localized error when `input` is unacceptable for `step`
    fn validate(&self, _step: &str, _input: &Value, _language: Language) -> Option<String> {
        None
    }

    /// Replace the declared successor based on collected data
    fn branch(&self, next: &'static str, _data: &FlowData) -> &'static str {
        next
    }

    /// Attach step extras or override narration for the new step
    fn decorate(&self, _result: &mut StepResult, _language: Language) {}
}

/// Flight booking hooks
#[derive(Debug, Clone, Copy, Default)]
pub struct BookingFlow;

impl FlowSpec for BookingFlow {
    fn definition(&self) -> &'static FlowDefinition {
        FlowDefinition::booking()
    }

    fn decorate(&self, result: &mut StepResult, language: Language) {
        match result.step {
            "flight_search" => {
                let flights = dummy_flights();
                result.message = messages::flights_found(flights.len(), language);
                result.next_step = Some("flight_selection");
                result.details.flights = Some(flights);
            },
            "review_booking" => result.details.requires_confirmation = true,
            "payment" => result.next_step = Some(TERMINAL_STEP),
            _ => {},
        }
    }
}

/// Web check-in hooks
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckInFlow;

impl FlowSpec for CheckInFlow {
    fn definition(&self) -> &'static FlowDefinition {
        FlowDefinition::check_in()
    }

    fn validate(&self, step: &str, input: &Value, language: Language) -> Option<String> {
        if step != "pnr_collection" {
            return None;
        }

        let length = input
            .get("pnr")
            .and_then(Value::as_str)
            .map(|pnr| pnr.chars().count())
            .unwrap_or(0);

        if length == PNR_LENGTH {
            None
        } else {
            Some(messages::pnr_length_error(language).to_string())
        }
    }

    fn branch(&self, next: &'static str, data: &FlowData) -> &'static str {
        if next != "processing_checkin" {
            return next;
        }

        let ready = CHECK_IN_REQUIRED.iter().all(|step| data.contains_key(*step));
        tracing::info!(ready, "Evaluated check-in prerequisites");
        if ready {
            "checkin_success"
        } else {
            "checkin_error"
        }
    }

    fn decorate(&self, result: &mut StepResult, _language: Language) {
        match result.step {
            "checkin_success" => result.details.success = Some(true),
            "checkin_error" => result.details.success = Some(false),
            _ => {},
        }
    }
}

/// Drives one flow for one session
#[derive(Debug, Clone)]
pub struct StepProcessor<F: FlowSpec> {
    spec: F,
    videos: Arc<VideoUrlResolver>,
    current_step: Option<&'static str>,
    data: FlowData,
}

pub type BookingProcessor = StepProcessor<BookingFlow>;
pub type CheckInProcessor = StepProcessor<CheckInFlow>;

impl<F: FlowSpec> StepProcessor<F> {
    pub fn new(videos: Arc<VideoUrlResolver>) -> Self {
        Self {
            spec: F::default(),
            videos,
            current_step: None,
            data: FlowData::new(),
        }
    }

    pub fn kind(&self) -> FlowKind {
        self.spec.definition().kind()
    }

    pub fn current_step(&self) -> Option<&'static str> {
        self.current_step
    }

    pub fn data(&self) -> &FlowData {
        &self.data
    }

    /// Move to the first step
    pub fn start(&mut self, language: Language) -> StepStart {
        let definition = self.spec.definition();
        let kind = definition.kind();
        let step = definition.first_step();
        self.current_step = Some(step);

        tracing::debug!(flow = %kind, step, "Flow started");

        StepStart {
            flow: kind,
            step,
            message: messages::step_message(kind, step, language),
            video_url: self.videos.resolve(step, language, kind),
            next_step: definition.next_step(step),
            show_input: true,
        }
    }

    /// Record input for `step` and advance past it
    pub fn process(&mut self, step: &str, input: Value, language: Language) -> StepOutcome {
        let definition = self.spec.definition();
        let kind = definition.kind();

        let rejection = self.spec.validate(step, &input, language);

        if !is_empty_input(&input) {
            self.data.insert(step.to_string(), input);
        }

        if let Some(message) = rejection {
            tracing::debug!(flow = %kind, step, "Step input rejected");
            return StepOutcome::Rejected(ValidationFailure {
                flow: kind,
                step: step.to_string(),
                message,
                video_url: self.videos.resolve(step, language, kind),
            });
        }

        let next = self.spec.branch(definition.next_step(step), &self.data);
        self.current_step = Some(next);

        let mut result = if is_terminal(next) {
            StepResult {
                flow: kind,
                step: TERMINAL_STEP,
                next_step: None,
                message: messages::step_message(kind, TERMINAL_STEP, language),
                video_url: None,
                data: self.data.clone(),
                completed: true,
                details: StepDetails::default(),
            }
        } else {
            StepResult {
                flow: kind,
                step: next,
                next_step: Some(definition.next_step(next)),
                message: messages::step_message(kind, next, language),
                video_url: self.videos.resolve(next, language, kind),
                data: self.data.clone(),
                completed: false,
                details: StepDetails::default(),
            }
        };

        self.spec.decorate(&mut result, language);
        result.completed = result.next_step.map_or(true, is_terminal);

        tracing::debug!(
            flow = %kind,
            from = step,
            to = result.step,
            completed = result.completed,
            "Step advanced"
        );

        StepOutcome::Advanced(result)
    }

    pub fn summary(&self) -> FlowSummary {
        let definition = self.spec.definition();
        FlowSummary {
            flow: definition.kind(),
            current_step: self.current_step,
            data: self.data.clone(),
            progress: self
                .current_step
                .map(|step| definition.progress(step))
                .unwrap_or(0),
        }
    }
}

fn is_empty_input(input: &Value) -> bool {
    match input {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        _ => false,
    }
}

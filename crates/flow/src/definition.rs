//! Static flow definitions
//!
//! A flow is an ordered list of `(step, next_step)` pairs. The list order is
//! the presentation order and drives progress reporting. Any step that is
//! not declared advances to [`TERMINAL_STEP`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel step that ends every flow
pub const TERMINAL_STEP: &str = "complete";

/// Which avatar flow a session is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlowKind {
    #[serde(rename = "booking")]
    Booking,
    #[serde(rename = "checkin", alias = "check_in", alias = "check-in")]
    CheckIn,
}

impl FlowKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlowKind::Booking => "booking",
            FlowKind::CheckIn => "checkin",
        }
    }

    /// Parse a flow name, accepting the common check-in spellings
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "booking" | "book" => Some(FlowKind::Booking),
            "checkin" | "check_in" | "check-in" => Some(FlowKind::CheckIn),
            _ => None,
        }
    }

    pub fn definition(&self) -> &'static FlowDefinition {
        match self {
            FlowKind::Booking => &BOOKING,
            FlowKind::CheckIn => &CHECK_IN,
        }
    }
}

impl fmt::Display for FlowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable step sequence of one flow
#[derive(Debug)]
pub struct FlowDefinition {
    kind: FlowKind,
    transitions: &'static [(&'static str, &'static str)],
}

static BOOKING: FlowDefinition = FlowDefinition {
    kind: FlowKind::Booking,
    transitions: &[
        ("welcome", "origin_selection"),
        ("origin_selection", "destination_selection"),
        ("destination_selection", "date_selection"),
        ("date_selection", "passenger_selection"),
        ("passenger_selection", "passenger_details"),
        ("passenger_details", "flight_search"),
        ("flight_search", "flight_selection"),
        ("flight_selection", "contact_details"),
        ("contact_details", "review_booking"),
        ("review_booking", "payment"),
        ("payment", TERMINAL_STEP),
    ],
};

// `checkin_error` is only reached through the processing branch.
static CHECK_IN: FlowDefinition = FlowDefinition {
    kind: FlowKind::CheckIn,
    transitions: &[
        ("welcome_checkin", "pnr_collection"),
        ("pnr_collection", "lastname_collection"),
        ("lastname_collection", "mobile_collection"),
        ("mobile_collection", "email_collection"),
        ("email_collection", "disclaimer_explanation"),
        ("disclaimer_explanation", "seat_consent"),
        ("seat_consent", "processing_checkin"),
        ("processing_checkin", "checkin_success"),
        ("checkin_success", TERMINAL_STEP),
        ("checkin_error", TERMINAL_STEP),
    ],
};

impl FlowDefinition {
    pub fn booking() -> &'static Self {
        &BOOKING
    }

    pub fn check_in() -> &'static Self {
        &CHECK_IN
    }

    pub fn kind(&self) -> FlowKind {
        self.kind
    }

    /// Step a freshly started flow shows
    pub fn first_step(&self) -> &'static str {
        self.transitions.first().map(|(step, _)| *step).unwrap_or(TERMINAL_STEP)
    }

    /// Declared steps in order, terminal excluded
    pub fn steps(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.transitions.iter().map(|(step, _)| *step)
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn contains(&self, step: &str) -> bool {
        self.transitions.iter().any(|(s, _)| *s == step)
    }

    /// Declared successor, or the terminal sentinel for unknown steps
    pub fn next_step(&self, step: &str) -> &'static str {
        self.transitions
            .iter()
            .find(|(s, _)| *s == step)
            .map(|(_, next)| *next)
            .unwrap_or(TERMINAL_STEP)
    }

    /// Position of `step` in the sequence as a percentage (0 when unknown)
    pub fn progress(&self, step: &str) -> u8 {
        match self.steps().position(|s| s == step) {
            Some(index) => ((index + 1) * 100 / self.len()) as u8,
            None => 0,
        }
    }
}

pub fn is_terminal(step: &str) -> bool {
    step == TERMINAL_STEP
}

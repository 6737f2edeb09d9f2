//! Flow Intent Detection
//!
//! Decides whether a free-text chat message should start the booking flow,
//! the check-in flow, or fall through to the generic chatbot.
//!
//! Matching is a plain substring test on the lowercased, trimmed query
//! against two phrase lists, each holding English and Hindi triggers.
//! Check-in phrases are tested first and the first matching list wins, so a
//! query such as "check in for my booking" starts check-in.

use serde::{Deserialize, Serialize};

/// Phrases that start the check-in flow
const CHECKIN_TRIGGERS: &[&str] = &[
    "check in",
    "check-in",
    "checkin",
    "web check in",
    "web checkin",
    "boarding pass",
    "online check in",
    "चेक इन",
    "वेब चेक इन",
    "बोर्डिंग पास",
    "ऑनलाइन चेक इन",
];

/// Phrases that start the booking flow
const BOOKING_TRIGGERS: &[&str] = &[
    "book flight",
    "flight booking",
    "book ticket",
    "avatar help",
    "step by step",
    "guided booking",
    "avatar guidance",
    "book a flight",
    "flight reservation",
    "new booking",
    "booking",
    "avatar",
    "अवतार के साथ उड़ान बुक करें",
    "book flight with avatar",
    "फ्लाइट बुक",
    "बुकिंग",
    "अवतार",
    "टिकट बुक",
];

/// Classification result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowIntent {
    StartBooking,
    StartCheckin,
    None,
}

impl FlowIntent {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlowIntent::StartBooking => "start_booking",
            FlowIntent::StartCheckin => "start_checkin",
            FlowIntent::None => "none",
        }
    }
}

/// Classification with the phrase that triggered it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntentMatch {
    pub intent: FlowIntent,
    pub keyword: Option<String>,
}

/// Keyword-based flow intent classifier
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    checkin_triggers: Vec<String>,
    booking_triggers: Vec<String>,
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentClassifier {
    /// Classifier with the built-in trigger phrases
    pub fn new() -> Self {
        Self::with_triggers(
            CHECKIN_TRIGGERS.iter().map(|s| s.to_string()).collect(),
            BOOKING_TRIGGERS.iter().map(|s| s.to_string()).collect(),
        )
    }

    /// Classifier with custom trigger phrases
    pub fn with_triggers(checkin_triggers: Vec<String>, booking_triggers: Vec<String>) -> Self {
        Self {
            checkin_triggers: checkin_triggers.into_iter().map(|t| t.to_lowercase()).collect(),
            booking_triggers: booking_triggers.into_iter().map(|t| t.to_lowercase()).collect(),
        }
    }

    pub fn classify(&self, query: &str) -> FlowIntent {
        self.classify_detailed(query).intent
    }

    pub fn classify_detailed(&self, query: &str) -> IntentMatch {
        let normalized = query.trim().to_lowercase();

        if let Some(keyword) = first_match(&self.checkin_triggers, &normalized) {
            tracing::debug!(keyword = %keyword, "Check-in trigger matched");
            return IntentMatch {
                intent: FlowIntent::StartCheckin,
                keyword: Some(keyword.to_string()),
            };
        }

        if let Some(keyword) = first_match(&self.booking_triggers, &normalized) {
            tracing::debug!(keyword = %keyword, "Booking trigger matched");
            return IntentMatch {
                intent: FlowIntent::StartBooking,
                keyword: Some(keyword.to_string()),
            };
        }

        IntentMatch {
            intent: FlowIntent::None,
            keyword: None,
        }
    }
}

fn first_match<'a>(triggers: &'a [String], query: &str) -> Option<&'a str> {
    triggers
        .iter()
        .find(|trigger| query.contains(trigger.as_str()))
        .map(String::as_str)
}

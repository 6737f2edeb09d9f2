//! Avatar video URL construction
//!
//! Booking clips live at `{base}/{folder}/{file}_{en|hi}.mp4`, check-in clips
//! at `{base}/avatar_checkin/{folder}/{step}_{eng|hindi}.mp4`. Steps without
//! a clip, the terminal step included, resolve to `None`.

use avatar_core::Language;

use crate::definition::{is_terminal, FlowKind};

const CHECK_IN_DIR: &str = "avatar_checkin";

/// Booking step → clip file stem
const BOOKING_FILES: &[(&str, &str)] = &[
    ("welcome", "welcome"),
    ("language_selection", "language_selection"),
    ("origin_selection", "origin_selection"),
    ("destination_selection", "destination_selection"),
    ("date_selection", "date_selection"),
    ("passenger_selection", "passenger_selection"),
    ("flight_search", "flight_search"),
    ("flight_selection", "flight_selection"),
    ("passenger_details", "passenger_details"),
    ("contact_details", "contact_details"),
    ("review_booking", "review_booking"),
    ("payment", "payment_handoff"),
];

fn folder(language: Language) -> &'static str {
    match language {
        Language::English => "english",
        Language::Hindi => "hindi",
    }
}

fn booking_suffix(language: Language) -> &'static str {
    match language {
        Language::English => "en",
        Language::Hindi => "hi",
    }
}

fn check_in_suffix(language: Language) -> &'static str {
    match language {
        Language::English => "eng",
        Language::Hindi => "hindi",
    }
}

/// Builds avatar clip URLs under a fixed base
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoUrlResolver {
    base_url: String,
}

impl VideoUrlResolver {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn resolve(&self, step: &str, language: Language, kind: FlowKind) -> Option<String> {
        if is_terminal(step) {
            return None;
        }

        match kind {
            FlowKind::Booking => {
                let file = BOOKING_FILES
                    .iter()
                    .find(|(s, _)| *s == step)
                    .map(|(_, file)| *file)?;
                Some(format!(
                    "{}/{}/{}_{}.mp4",
                    self.base_url,
                    folder(language),
                    file,
                    booking_suffix(language)
                ))
            },
            FlowKind::CheckIn => {
                if !kind.definition().contains(step) {
                    return None;
                }
                Some(format!(
                    "{}/{}/{}/{}_{}.mp4",
                    self.base_url,
                    CHECK_IN_DIR,
                    folder(language),
                    step,
                    check_in_suffix(language)
                ))
            },
        }
    }
}

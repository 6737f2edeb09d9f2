//! Generic chatbot replies before an avatar flow starts

use avatar_core::{translate_or_fallback, Language, Translator};
use avatar_text_processing::{FlowIntent, IntentClassifier};
use std::sync::Arc;
use std::time::Duration;

use crate::definition::FlowKind;

pub const IN_FLOW_MESSAGE: &str = "Please use the avatar flow to continue.";

const CANNED_PROMPTS: &[&str] = &[
    "Hello! I can help you with flight bookings, check-in, seat selection, and more. Would you like to book a flight with avatar guidance?",
    "I'm here to assist with your travel needs. Would you like me to guide you through booking a flight with our avatar assistant?",
    "How can I help you today? I can assist with flight bookings, flight status, check-in, and more. Want to try avatar-guided booking?",
];

/// Canned prompt for a 1-based turn number, repeating the last one
pub fn canned_prompt(turn: u32) -> &'static str {
    let index = (turn.saturating_sub(1) as usize).min(CANNED_PROMPTS.len() - 1);
    CANNED_PROMPTS[index]
}

pub fn trigger_message(kind: FlowKind, language: Language) -> &'static str {
    match (kind, language) {
        (FlowKind::CheckIn, Language::English) => {
            "Great! I'll guide you through web check-in with step-by-step avatar assistance."
        },
        (FlowKind::CheckIn, Language::Hindi) => {
            "बहुत अच्छा! मैं चरणबद्ध अवतार सहायता के साथ वेब चेक-इन के माध्यम से आपका मार्गदर्शन करूंगा।"
        },
        (FlowKind::Booking, Language::English) => {
            "Great! I'll guide you through booking with step-by-step avatar assistance."
        },
        (FlowKind::Booking, Language::Hindi) => {
            "बहुत अच्छा! मैं चरणबद्ध अवतार सहायता के साथ बुकिंग के माध्यम से आपका मार्गदर्शन करूंगा।"
        },
    }
}

/// Chat turns seen by one session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TurnCounter(u32);

impl TurnCounter {
    /// Count a new turn and return its 1-based number
    pub fn advance(&mut self) -> u32 {
        self.0 = self.0.saturating_add(1);
        self.0
    }

    pub fn count(&self) -> u32 {
        self.0
    }
}

/// What the chatbot decided for one message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatReply {
    /// The session is already inside a flow
    InFlow { message: String },
    /// The message starts a flow
    Trigger { flow: FlowKind, message: String },
    /// Generic prompt, translated when possible
    Canned { message: String, fallback_used: bool },
}

impl ChatReply {
    pub fn message(&self) -> &str {
        match self {
            ChatReply::InFlow { message }
            | ChatReply::Trigger { message, .. }
            | ChatReply::Canned { message, .. } => message,
        }
    }
}

/// Shared chatbot logic; per-session turn state lives in [`TurnCounter`]
pub struct ChatbotResponder {
    classifier: IntentClassifier,
    translator: Arc<dyn Translator>,
}

impl ChatbotResponder {
    pub fn new(classifier: IntentClassifier, translator: Arc<dyn Translator>) -> Self {
        Self {
            classifier,
            translator,
        }
    }

    pub fn classifier(&self) -> &IntentClassifier {
        &self.classifier
    }

    /// Reply to `query` on the given 1-based turn
    ///
    /// `translate_timeout` bounds the canned prompt translation; callers pass
    /// the live setting so a config reload applies to the next message.
    pub async fn respond(
        &self,
        query: &str,
        language: Language,
        turn: u32,
        in_flow: bool,
        translate_timeout: Duration,
    ) -> ChatReply {
        if in_flow {
            return ChatReply::InFlow {
                message: IN_FLOW_MESSAGE.to_string(),
            };
        }

        let flow = match self.classifier.classify(query) {
            FlowIntent::StartCheckin => Some(FlowKind::CheckIn),
            FlowIntent::StartBooking => Some(FlowKind::Booking),
            FlowIntent::None => None,
        };

        if let Some(flow) = flow {
            tracing::info!(flow = %flow, "Chat query triggered avatar flow");
            return ChatReply::Trigger {
                flow,
                message: trigger_message(flow, language).to_string(),
            };
        }

        let prompt = canned_prompt(turn);
        let outcome = translate_or_fallback(
            self.translator.as_ref(),
            prompt,
            Language::English,
            language,
            translate_timeout,
        )
        .await;

        ChatReply::Canned {
            fallback_used: outcome.is_fallback(),
            message: outcome.into_value(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use avatar_core::{NoopTranslator, Result};

    const TIMEOUT: Duration = Duration::from_secs(1);

    struct TaggingTranslator;

    struct SlowTranslator;

    #[async_trait]
    impl Translator for SlowTranslator {
        async fn translate(&self, text: &str, _from: Language, _to: Language) -> Result<String> {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok(format!("slow {}", text))
        }

        fn name(&self) -> &str {
            "slow"
        }
    }

    #[async_trait]
    impl Translator for TaggingTranslator {
        async fn translate(&self, text: &str, _from: Language, to: Language) -> Result<String> {
            Ok(format!("[{}] {}", to, text))
        }

        fn name(&self) -> &str {
            "tagging"
        }
    }

    fn responder(translator: Arc<dyn Translator>) -> ChatbotResponder {
        ChatbotResponder::new(IntentClassifier::new(), translator)
    }

    #[test]
    fn test_turn_counter_caps_prompt_index() {
        let mut turns = TurnCounter::default();
        let prompts: Vec<&str> = (0..6).map(|_| canned_prompt(turns.advance())).collect();

        assert_eq!(turns.count(), 6);
        assert_eq!(prompts[0], CANNED_PROMPTS[0]);
        assert_eq!(prompts[1], CANNED_PROMPTS[1]);
        assert!(prompts[2..].iter().all(|p| *p == CANNED_PROMPTS[2]));
        assert_eq!(canned_prompt(0), CANNED_PROMPTS[0]);
    }

    #[tokio::test]
    async fn test_in_flow_skips_classification() {
        let bot = responder(Arc::new(NoopTranslator::new()));
        let reply = bot.respond("book a flight", Language::English, 3, true, TIMEOUT).await;
        assert_eq!(reply.message(), IN_FLOW_MESSAGE);
    }

    #[tokio::test]
    async fn test_triggers() {
        let bot = responder(Arc::new(NoopTranslator::new()));

        let reply = bot.respond("web check-in please", Language::Hindi, 1, false, TIMEOUT).await;
        assert_eq!(
            reply,
            ChatReply::Trigger {
                flow: FlowKind::CheckIn,
                message: trigger_message(FlowKind::CheckIn, Language::Hindi).to_string(),
            }
        );

        let reply = bot.respond("Book a flight", Language::English, 1, false, TIMEOUT).await;
        assert!(matches!(reply, ChatReply::Trigger { flow: FlowKind::Booking, .. }));
    }

    #[tokio::test]
    async fn test_canned_prompt_translated() {
        let bot = responder(Arc::new(TaggingTranslator));
        let reply = bot.respond("hello", Language::Hindi, 2, false, TIMEOUT).await;
        assert_eq!(
            reply,
            ChatReply::Canned {
                message: format!("[hi] {}", CANNED_PROMPTS[1]),
                fallback_used: false,
            }
        );
    }

    #[tokio::test]
    async fn test_translation_failure_uses_english() {
        let bot = responder(Arc::new(NoopTranslator::new()));
        let reply = bot.respond("hello", Language::Hindi, 1, false, TIMEOUT).await;
        assert_eq!(
            reply,
            ChatReply::Canned {
                message: CANNED_PROMPTS[0].to_string(),
                fallback_used: true,
            }
        );
    }

    #[tokio::test]
    async fn test_english_prompt_needs_no_translation() {
        let bot = responder(Arc::new(NoopTranslator::new()));
        let reply = bot.respond("hi there", Language::English, 1, false, TIMEOUT).await;
        assert!(matches!(reply, ChatReply::Canned { fallback_used: false, .. }));
    }

    #[tokio::test]
    async fn test_translate_timeout_is_per_call() {
        let bot = responder(Arc::new(SlowTranslator));

        let reply = bot
            .respond("hello", Language::Hindi, 1, false, Duration::from_millis(10))
            .await;
        assert!(matches!(reply, ChatReply::Canned { fallback_used: true, .. }));

        let reply = bot
            .respond("hello", Language::Hindi, 1, false, Duration::from_secs(5))
            .await;
        assert_eq!(reply.message(), format!("slow {}", CANNED_PROMPTS[0]));
    }
}

//! Localized avatar narration
//!
//! One table per flow and language. Lookups fall back to the English table,
//! then to `Processing {step}`, which is also what the terminal step reads.

use avatar_core::Language;

use crate::definition::FlowKind;

type Table = &'static [(&'static str, &'static str)];

const BOOKING_EN: Table = &[
    ("welcome", "Hello! I'll help you book your flight. Let's get started!"),
    ("origin_selection", "Great! Let's start by selecting your departure city. Where would you like to fly from?"),
    ("destination_selection", "Perfect! Now, where would you like to fly to?"),
    ("date_selection", "Excellent! When would you like to travel? Please select your preferred date."),
    ("passenger_selection", "Now let's select the number of passengers. How many people will be traveling?"),
    ("passenger_details", "Now I need details for all passengers. Please provide information for each traveler."),
    ("flight_search", "Searching for flights based on your preferences..."),
    ("flight_selection", "Here are the available flights. Please select your preferred option."),
    ("contact_details", "Please provide contact details for booking."),
    ("review_booking", "Please review your booking details before proceeding to payment."),
    ("payment", "Redirecting to secure payment gateway..."),
];

const BOOKING_HI: Table = &[
    ("welcome", "नमस्ते! मैं आपकी फ्लाइट बुकिंग में मदद करूंगा। चलिए शुरुआत करते हैं!"),
    ("origin_selection", "बहुत अच्छा! चलिए अपने प्रस्थान शहर को चुनकर शुरुआत करते हैं। आप कहाँ से उड़ान भरना चाहते हैं?"),
    ("destination_selection", "बिल्कुल! अब आप कहाँ जाना चाहते हैं?"),
    ("date_selection", "शानदार! आप कब यात्रा करना चाहते हैं? अपनी पसंदीदा तारीख चुनें।"),
    ("passenger_selection", "अब आइए यात्रियों की संख्या चुनें। कितने लोग यात्रा करेंगे?"),
    ("passenger_details", "अब मुझे सभी यात्रियों का विवरण चाहिए। कृपया प्रत्येक यात्री की जानकारी प्रदान करें।"),
    ("flight_search", "आपकी पसंद के अनुसार उड़ानों की खोज जारी है..."),
    ("flight_selection", "यहाँ उपलब्ध उड़ानें हैं। अपनी पसंदीदा उड़ान चुनें।"),
    ("contact_details", "बुकिंग के लिए संपर्क विवरण प्रदान करें।"),
    ("review_booking", "भुगतान के लिए आगे बढ़ने से पहले अपने बुकिंग विवरण की समीक्षा करें।"),
    ("payment", "सुरक्षित भुगतान गेटवे पर पुनर्निर्देशित किया जा रहा है..."),
];

const CHECK_IN_EN: Table = &[
    ("welcome_checkin", "Hello! I'll help you with web check-in. Let's get started!"),
    ("pnr_collection", "Please enter your 6-character PNR number."),
    ("lastname_collection", "Please enter the last name used during booking."),
    ("mobile_collection", "Please provide your mobile number with country code (e.g., +91)."),
    ("email_collection", "Please enter your email address to receive the boarding pass."),
    ("disclaimer_explanation", "Your check-in will be done automatically 6-12 hours before flight departure with a free seat based on availability."),
    ("seat_consent", "Do you consent to automatic seat assignment?"),
    ("processing_checkin", "Processing your check-in request..."),
    ("checkin_success", "Check-in successful! You'll receive your boarding pass via email 6-12 hours before departure."),
    ("checkin_error", "Unable to complete check-in. Please verify your details and try again."),
];

const CHECK_IN_HI: Table = &[
    ("welcome_checkin", "नमस्ते! मैं आपकी वेब चेक-इन में मदद करूंगा। चलिए शुरू करते हैं!"),
    ("pnr_collection", "कृपया अपना 6-अक्षर का PNR नंबर दर्ज करें।"),
    ("lastname_collection", "कृपया बुकिंग के दौरान उपयोग किया गया अंतिम नाम दर्ज करें।"),
    ("mobile_collection", "कृपया देश कोड के साथ अपना मोबाइल नंबर प्रदान करें (जैसे +91)।"),
    ("email_collection", "बोर्डिंग पास प्राप्त करने के लिए अपना ईमेल पता दर्ज करें।"),
    ("disclaimer_explanation", "आपकी चेक-इन उड़ान प्रस्थान से 6-12 घंटे पहले उपलब्धता के आधार पर मुफ्त सीट के साथ स्वचालित रूप से की जाएगी।"),
    ("seat_consent", "क्या आप स्वचालित सीट असाइनमेंट के लिए सहमत हैं?"),
    ("processing_checkin", "आपके चेक-इन अनुरोध को संसाधित किया जा रहा है..."),
    ("checkin_success", "चेक-इन सफल! आपको प्रस्थान से 6-12 घंटे पहले ईमेल के माध्यम से बोर्डिंग पास प्राप्त होगा।"),
    ("checkin_error", "चेक-इन पूरा करने में असमर्थ। कृपया अपने विवरण सत्यापित करें और पुनः प्रयास करें।"),
];

fn table(kind: FlowKind, language: Language) -> Table {
    match (kind, language) {
        (FlowKind::Booking, Language::English) => BOOKING_EN,
        (FlowKind::Booking, Language::Hindi) => BOOKING_HI,
        (FlowKind::CheckIn, Language::English) => CHECK_IN_EN,
        (FlowKind::CheckIn, Language::Hindi) => CHECK_IN_HI,
    }
}

fn find(table: Table, step: &str) -> Option<&'static str> {
    table.iter().find(|(s, _)| *s == step).map(|(_, text)| *text)
}

/// Exact table entry, without any fallback
pub fn lookup(kind: FlowKind, step: &str, language: Language) -> Option<&'static str> {
    find(table(kind, language), step)
}

/// Narration for `step`, with English and generic fallbacks
pub fn step_message(kind: FlowKind, step: &str, language: Language) -> String {
    lookup(kind, step, language)
        .or_else(|| lookup(kind, step, Language::English))
        .map(str::to_string)
        .unwrap_or_else(|| format!("Processing {}", step))
}

pub fn flights_found(count: usize, language: Language) -> String {
    match language {
        Language::English => format!("Found {} flights", count),
        Language::Hindi => format!("{} उड़ानें मिलीं", count),
    }
}

pub fn pnr_length_error(language: Language) -> &'static str {
    match language {
        Language::English => "PNR must be 6 characters",
        Language::Hindi => "PNR 6 अक्षर का होना चाहिए",
    }
}

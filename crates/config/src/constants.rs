//! Centralized constants for the avatar booking backend
//!
//! Defaults shared between the config layer, the video resolver and the
//! service clients live here so they stay in one place.

/// Server defaults
pub mod server {
    pub const DEFAULT_HOST: &str = "0.0.0.0";

    /// Port the video assets are served from as well
    pub const DEFAULT_PORT: u16 = 8000;

    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
}

/// Avatar video hosting
pub mod videos {
    /// Path segment under which the video assets are mounted
    pub const PATH_SEGMENT: &str = "/videos";

    pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/videos";

    /// Probe address for outbound local IP discovery (no packets are sent)
    pub const LOCAL_IP_PROBE: &str = "8.8.8.8:80";
}

/// External service settings (Sarvam AI)
pub mod services {
    pub const TRANSLATE_TIMEOUT_MS: u64 = 10_000;
    pub const TTS_TIMEOUT_MS: u64 = 15_000;

    pub const TRANSLATION_MODEL: &str = "mayura:v1";
    pub const TRANSLATION_MODE: &str = "formal";
    pub const TRANSLATION_SPEAKER_GENDER: &str = "Female";

    pub const TTS_MODEL: &str = "bulbul:v1";
    pub const TTS_SPEAKER: &str = "meera";
    pub const TTS_SAMPLE_RATE: u32 = 8000;
}

/// Legacy environment variables from earlier deployments
pub mod env {
    pub const AVATAR_CDN_URL: &str = "AVATAR_CDN_URL";
    pub const NGROK_URL: &str = "NGROK_URL";
    pub const SARVAM_API_KEY: &str = "SARVAM_API_KEY";
    pub const SARVAM_TRANSLATE_URL: &str = "SARVAM_TRANSLATE_URL";
    pub const SARVAM_TTS_URL: &str = "SARVAM_TTS_URL";
}

//! HTTP Endpoints
//!
//! REST API for the chatbot hand-off and the avatar flows.

use axum::{
    extract::{FromRequest, Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use avatar_core::{synthesize_or_none, Language};
use avatar_flow::{ChatReply, FlowKind, FlowResponse, StepOutcome};

use crate::metrics::{metrics_handler, record_chat, record_fallback, record_flow_step};
use crate::session::SessionSnapshot;
use crate::state::AppState;
use crate::{panic_response, ServerError};

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let timeout = state.config.read().server.request_timeout();

    Router::new()
        // Chatbot
        .route("/chat", post(chat))
        .route("/test-avatar", post(test_avatar))
        // Flow steps
        .route("/avatar-step", post(avatar_step))
        .route("/checkin-step", post(checkin_step))
        .route("/avatar-video/:step", get(avatar_video))
        // Sessions
        .route("/session/:id", get(get_session).delete(delete_session))
        // Speech
        .route("/speech", post(speech))
        // Health check
        .route("/health", get(health_check))
        // Prometheus metrics
        .route("/metrics", get(metrics_handler))
        // Admin endpoints
        .route("/admin/reload-config", post(reload_config))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// JSON body extractor whose rejections use the `{error, message}` body
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ServerError))]
struct AppJson<T>(T);

fn resolve_language(language: Option<&str>) -> Language {
    language.map(Language::resolve).unwrap_or_default()
}

/// Chat request
#[derive(Debug, Deserialize)]
struct ChatRequest {
    query: String,
    #[serde(default, alias = "uid")]
    session_id: Option<String>,
    #[serde(default)]
    language: Option<String>,
}

/// Chat endpoint
///
/// Creates the session on first contact and starts a flow when the query
/// carries a trigger phrase.
async fn chat(
    State(state): State<AppState>,
    AppJson(request): AppJson<ChatRequest>,
) -> Result<Json<FlowResponse>, ServerError> {
    let language = resolve_language(request.language.as_deref());
    let session_id = request
        .session_id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let session = state.session_or_create(&session_id, language).await?;
    let (turn, in_flow) = session.with_state(|s| {
        s.language = language;
        (s.turns.advance(), s.active_flow.is_some())
    });

    let reply = state
        .chatbot
        .respond(&request.query, language, turn, in_flow, state.translate_timeout())
        .await;

    let response = match reply {
        ChatReply::InFlow { message } => FlowResponse::ChatbotResponse {
            session_id,
            message,
            show_quick_actions: false,
            fallback_used: false,
        },
        ChatReply::Canned {
            message,
            fallback_used,
        } => {
            if fallback_used {
                record_fallback("translation");
            }
            FlowResponse::ChatbotResponse {
                session_id,
                message,
                show_quick_actions: true,
                fallback_used,
            }
        },
        ChatReply::Trigger { flow, message } => {
            let start = session.with_state(|s| {
                let start = match flow {
                    FlowKind::Booking => s.booking.start(language),
                    FlowKind::CheckIn => s.check_in.start(language),
                };
                s.active_flow = Some(flow);
                s.current_step = Some(start.step.to_string());
                start
            });
            tracing::info!(session_id = %session_id, flow = %flow, "Avatar flow started");
            FlowResponse::FlowTrigger {
                session_id,
                trigger_message: message,
                start,
            }
        },
    };

    record_chat(response.kind());
    Ok(Json(response))
}

/// Flow step request
#[derive(Debug, Deserialize)]
struct StepRequest {
    #[serde(alias = "uid")]
    session_id: String,
    step: String,
    #[serde(default, alias = "user_input")]
    input: Value,
    #[serde(default)]
    language: Option<String>,
}

async fn avatar_step(
    State(state): State<AppState>,
    AppJson(request): AppJson<StepRequest>,
) -> Result<Json<FlowResponse>, ServerError> {
    process_step(&state, FlowKind::Booking, request).await
}

async fn checkin_step(
    State(state): State<AppState>,
    AppJson(request): AppJson<StepRequest>,
) -> Result<Json<FlowResponse>, ServerError> {
    process_step(&state, FlowKind::CheckIn, request).await
}

async fn process_step(
    state: &AppState,
    flow: FlowKind,
    request: StepRequest,
) -> Result<Json<FlowResponse>, ServerError> {
    let language = resolve_language(request.language.as_deref());
    let session = state.session(&request.session_id).await?;

    let outcome = session.with_state(|s| {
        s.language = language;
        let outcome = match flow {
            FlowKind::Booking => s.booking.process(&request.step, request.input, language),
            FlowKind::CheckIn => s.check_in.process(&request.step, request.input, language),
        };
        if let StepOutcome::Advanced(result) = &outcome {
            s.current_step = Some(result.step.to_string());
            s.active_flow = if result.completed { None } else { Some(flow) };
        }
        outcome
    });

    let response = FlowResponse::from_outcome(request.session_id, outcome);
    record_flow_step(flow, response.kind());
    tracing::debug!(flow = %flow, step = %request.step, reply = response.kind(), "Processed step");

    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
struct VideoQuery {
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    flow: Option<String>,
}

#[derive(Debug, Serialize)]
struct VideoResponse {
    video_url: Option<String>,
    step: String,
    language: Language,
    flow: FlowKind,
}

/// Avatar clip lookup
///
/// GET /avatar-video/:step?language=hi&flow=checkin
async fn avatar_video(
    State(state): State<AppState>,
    Path(step): Path<String>,
    Query(query): Query<VideoQuery>,
) -> Result<Json<VideoResponse>, ServerError> {
    let language = resolve_language(query.language.as_deref());
    let flow = match query.flow.as_deref() {
        None => FlowKind::Booking,
        Some(name) => FlowKind::from_str_loose(name)
            .ok_or_else(|| ServerError::InvalidRequest(format!("Unknown flow '{}'", name)))?,
    };

    Ok(Json(VideoResponse {
        video_url: state.videos.resolve(&step, language, flow),
        step,
        language,
        flow,
    }))
}

/// Get session info
async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionSnapshot>, ServerError> {
    let session = state.session(&id).await?;
    Ok(Json(session.snapshot()))
}

/// Delete session
async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ServerError> {
    let message = if state.sessions.remove(&id).await? {
        "Session cleared"
    } else {
        "Session not found"
    };
    Ok(Json(serde_json::json!({ "message": message })))
}

/// Trigger dry run
///
/// Classifies the query on a fresh first turn without touching any session.
async fn test_avatar(
    State(state): State<AppState>,
    AppJson(request): AppJson<ChatRequest>,
) -> Json<Value> {
    let language = resolve_language(request.language.as_deref());
    let reply = state
        .chatbot
        .respond(&request.query, language, 1, false, state.translate_timeout())
        .await;

    let result = match &reply {
        ChatReply::Trigger { flow, message } => serde_json::json!({
            "type": "flow_trigger",
            "flow": flow,
            "message": message,
        }),
        ChatReply::Canned { message, fallback_used } => serde_json::json!({
            "type": "chatbot_response",
            "message": message,
            "fallback_used": fallback_used,
        }),
        ChatReply::InFlow { message } => serde_json::json!({
            "type": "chatbot_response",
            "message": message,
        }),
    };

    let triggered = match &reply {
        ChatReply::Trigger { flow, .. } => Some(*flow),
        _ => None,
    };

    Json(serde_json::json!({
        "query": request.query,
        "language": language,
        "result": result,
        "should_trigger": triggered == Some(FlowKind::Booking),
        "triggered_flow": triggered,
    }))
}

#[derive(Debug, Deserialize)]
struct SpeechRequest {
    text: String,
    #[serde(default)]
    language: Option<String>,
}

#[derive(Debug, Serialize)]
struct SpeechResponse {
    audio: Option<String>,
    language: Language,
    fallback_used: bool,
}

/// Text-to-speech for avatar narration
async fn speech(
    State(state): State<AppState>,
    AppJson(request): AppJson<SpeechRequest>,
) -> Result<Json<SpeechResponse>, ServerError> {
    if request.text.trim().is_empty() {
        return Err(ServerError::InvalidRequest("text must not be empty".to_string()));
    }

    let language = resolve_language(request.language.as_deref());
    let outcome = synthesize_or_none(
        state.synthesizer.as_ref(),
        &request.text,
        language,
        state.tts_timeout(),
    )
    .await;

    if outcome.is_fallback() {
        record_fallback("speech");
    }

    Ok(Json(SpeechResponse {
        fallback_used: outcome.is_fallback(),
        audio: outcome.into_value(),
        language,
    }))
}

/// Health check
async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, ServerError> {
    let sessions = state.sessions.count().await?;
    Ok(Json(serde_json::json!({
        "status": "healthy",
        "message": "Backend is running!",
        "version": env!("CARGO_PKG_VERSION"),
        "sessions": sessions,
        "translator": state.translator.name(),
        "synthesizer": state.synthesizer.name(),
    })))
}

/// Config reload endpoint
///
/// POST /admin/reload-config
async fn reload_config(State(state): State<AppState>) -> impl IntoResponse {
    match state.reload_config() {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "status": "success",
                "message": "Configuration reloaded successfully"
            })),
        ),
        Err(e) => {
            tracing::error!("Config reload failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "status": "error",
                    "message": e
                })),
            )
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use avatar_config::Settings;

    #[test]
    fn test_router_creation() {
        let state = AppState::new(Settings::default());
        let _ = create_router(state);
    }

    #[test]
    fn test_step_request_aliases() {
        let request: StepRequest = serde_json::from_value(serde_json::json!({
            "uid": "u-1",
            "step": "welcome",
            "user_input": {"ok": true},
            "language": "hi"
        }))
        .unwrap();
        assert_eq!(request.session_id, "u-1");
        assert_eq!(request.input["ok"], true);
    }

    #[test]
    fn test_language_resolution() {
        assert_eq!(resolve_language(None), Language::English);
        assert_eq!(resolve_language(Some("hi-IN")), Language::Hindi);
        assert_eq!(resolve_language(Some("ta")), Language::English);
    }
}

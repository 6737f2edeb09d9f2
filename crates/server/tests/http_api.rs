//! HTTP API tests driving the router in-process

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use avatar_config::Settings;
use avatar_core::{Language, NoopSynthesizer, Result, SpeechSynthesizer, Translator};
use avatar_server::{create_router, AppState, InMemorySessionStore};

struct BracketTranslator;

#[async_trait]
impl Translator for BracketTranslator {
    async fn translate(&self, text: &str, _from: Language, to: Language) -> Result<String> {
        Ok(format!("<{}>{}", to, text))
    }

    fn name(&self) -> &str {
        "bracket"
    }
}

struct FixedSynthesizer;

#[async_trait]
impl SpeechSynthesizer for FixedSynthesizer {
    async fn synthesize(&self, _text: &str, _language: Language) -> Result<Option<String>> {
        Ok(Some("UklGRg==".to_string()))
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

fn settings() -> Settings {
    let mut settings = Settings::default();
    settings.avatar.public_url = None;
    settings.avatar.cdn_url = Some("https://cdn.example.com/videos".to_string());
    settings.avatar.detect_local_ip = false;
    settings.services.translate_url = None;
    settings.services.tts_url = None;
    settings
}

fn app_with(synthesizer: Arc<dyn SpeechSynthesizer>) -> Router {
    let state = AppState::with_services(
        settings(),
        Arc::new(InMemorySessionStore::new()),
        Arc::new(BracketTranslator),
        synthesizer,
    );
    create_router(state)
}

fn app() -> Router {
    app_with(Arc::new(FixedSynthesizer))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        },
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

async fn post(app: &Router, uri: &str, body: Value) -> Value {
    let (status, json) = send(app, Method::POST, uri, Some(body)).await;
    assert_eq!(status, StatusCode::OK, "{} -> {}", uri, json);
    json
}

#[tokio::test]
async fn test_health() {
    let app = app();
    let (status, json) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["message"], "Backend is running!");
}

#[tokio::test]
async fn test_chat_creates_session_and_cycles_prompts() {
    let app = app();

    let first = post(&app, "/chat", json!({"query": "hello", "language": "en"})).await;
    assert_eq!(first["type"], "chatbot_response");
    assert_eq!(first["show_quick_actions"], true);
    let session_id = first["session_id"].as_str().unwrap().to_string();
    assert!(!session_id.is_empty());

    let mut last = Value::Null;
    for _ in 0..4 {
        last = post(&app, "/chat", json!({"query": "hello", "uid": session_id, "language": "en"})).await;
    }
    assert_eq!(
        last["message"],
        "How can I help you today? I can assist with flight bookings, flight status, check-in, and more. Want to try avatar-guided booking?"
    );

    let (status, summary) = send(&app, Method::GET, &format!("/session/{}", session_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["chat_turns"], 5);
    assert_eq!(summary["in_avatar_flow"], false);
}

#[tokio::test]
async fn test_chat_translates_canned_prompt() {
    let app = app();
    let reply = post(&app, "/chat", json!({"query": "namaste", "language": "hi"})).await;
    assert_eq!(reply["type"], "chatbot_response");
    assert_eq!(reply["fallback_used"], false);
    assert!(reply["message"].as_str().unwrap().starts_with("<hi>Hello!"));
}

#[tokio::test]
async fn test_booking_flow_end_to_end() {
    let app = app();

    let trigger = post(&app, "/chat", json!({"query": "I want to book a flight", "session_id": "b-1"})).await;
    assert_eq!(trigger["type"], "flow_trigger");
    assert_eq!(trigger["flow"], "booking");
    assert_eq!(trigger["step"], "welcome");
    assert_eq!(trigger["next_step"], "origin_selection");
    assert_eq!(trigger["video_url"], "https://cdn.example.com/videos/english/welcome_en.mp4");

    let in_flow = post(&app, "/chat", json!({"query": "book a flight", "session_id": "b-1"})).await;
    assert_eq!(in_flow["message"], "Please use the avatar flow to continue.");

    let step = post(
        &app,
        "/avatar-step",
        json!({"session_id": "b-1", "step": "origin_selection", "input": {"city": "DEL"}, "language": "hi"}),
    )
    .await;
    assert_eq!(step["type"], "flow_step");
    assert_eq!(step["step"], "destination_selection");
    assert_eq!(step["message"], "बिल्कुल! अब आप कहाँ जाना चाहते हैं?");
    assert!(step["video_url"].as_str().unwrap().contains("/hindi/"));

    let search = post(
        &app,
        "/avatar-step",
        json!({"uid": "b-1", "step": "passenger_details", "user_input": {"count": 1}}),
    )
    .await;
    assert_eq!(search["step"], "flight_search");
    assert_eq!(search["message"], "Found 3 flights");
    assert_eq!(search["flights"].as_array().unwrap().len(), 3);

    let payment = post(
        &app,
        "/avatar-step",
        json!({"session_id": "b-1", "step": "review_booking", "input": {"confirmed": true}}),
    )
    .await;
    assert_eq!(payment["type"], "flow_complete");
    assert_eq!(payment["step"], "payment");
    assert_eq!(payment["next_step"], "complete");

    let (_, summary) = send(&app, Method::GET, "/session/b-1", None).await;
    assert_eq!(summary["active_flow"], Value::Null);
    assert_eq!(summary["booking"]["current_step"], "payment");
    assert_eq!(summary["booking"]["data"]["origin_selection"]["city"], "DEL");
}

#[tokio::test]
async fn test_checkin_validation_and_branch() {
    let app = app();

    let trigger = post(&app, "/chat", json!({"query": "web check-in", "session_id": "c-1"})).await;
    assert_eq!(trigger["flow"], "checkin");
    assert_eq!(trigger["step"], "welcome_checkin");

    let rejected = post(
        &app,
        "/checkin-step",
        json!({"session_id": "c-1", "step": "pnr_collection", "input": {"pnr": "AB12C"}}),
    )
    .await;
    assert_eq!(rejected["type"], "validation_error");
    assert_eq!(rejected["step"], "pnr_collection");
    assert_eq!(rejected["message"], "PNR must be 6 characters");

    for (step, input) in [
        ("pnr_collection", json!({"pnr": "AB12CD"})),
        ("lastname_collection", json!({"lastname": "Rao"})),
        ("mobile_collection", json!({"mobile": "+919800000000"})),
        ("email_collection", json!({"email": "rao@example.com"})),
        ("disclaimer_explanation", json!({"ack": true})),
    ] {
        let reply = post(&app, "/checkin-step", json!({"session_id": "c-1", "step": step, "input": input})).await;
        assert_eq!(reply["type"], "flow_step", "{}", step);
    }

    let done = post(
        &app,
        "/checkin-step",
        json!({"session_id": "c-1", "step": "seat_consent", "input": {"consent": true}}),
    )
    .await;
    assert_eq!(done["type"], "flow_complete");
    assert_eq!(done["step"], "checkin_success");
    assert_eq!(done["success"], true);
}

#[tokio::test]
async fn test_step_for_unknown_session_is_404() {
    let app = app();
    let (status, json) = send(
        &app,
        Method::POST,
        "/avatar-step",
        Some(json!({"session_id": "missing", "step": "welcome", "input": {}})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "session_not_found");

    let (status, _) = send(&app, Method::GET, "/session/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_session() {
    let app = app();
    post(&app, "/chat", json!({"query": "hello", "session_id": "d-1"})).await;

    let (status, json) = send(&app, Method::DELETE, "/session/d-1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Session cleared");

    let (_, json) = send(&app, Method::DELETE, "/session/d-1", None).await;
    assert_eq!(json["message"], "Session not found");
}

#[tokio::test]
async fn test_avatar_video_lookup() {
    let app = app();

    let (status, json) = send(&app, Method::GET, "/avatar-video/payment?language=hi", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["video_url"], "https://cdn.example.com/videos/hindi/payment_handoff_hi.mp4");
    assert_eq!(json["language"], "hi");

    let (_, json) = send(&app, Method::GET, "/avatar-video/seat_consent?flow=checkin", None).await;
    assert_eq!(
        json["video_url"],
        "https://cdn.example.com/videos/avatar_checkin/english/seat_consent_eng.mp4"
    );

    let (_, json) = send(&app, Method::GET, "/avatar-video/complete", None).await;
    assert!(json["video_url"].is_null());

    let (status, _) = send(&app, Method::GET, "/avatar-video/welcome?flow=upgrade", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_avatar_dry_run() {
    let app = app();
    let json = post(&app, "/test-avatar", json!({"query": "avatar guidance please", "language": "en"})).await;
    assert_eq!(json["should_trigger"], true);
    assert_eq!(json["result"]["type"], "flow_trigger");

    let json = post(&app, "/test-avatar", json!({"query": "boarding pass", "language": "en"})).await;
    assert_eq!(json["should_trigger"], false);
    assert_eq!(json["triggered_flow"], "checkin");
}

#[tokio::test]
async fn test_speech() {
    let app = app();
    let json = post(&app, "/speech", json!({"text": "नमस्ते", "language": "hi"})).await;
    assert_eq!(json["audio"], "UklGRg==");
    assert_eq!(json["fallback_used"], false);

    let app = app_with(Arc::new(NoopSynthesizer::new()));
    let json = post(&app, "/speech", json!({"text": "hello"})).await;
    assert!(json["audio"].is_null());
    assert_eq!(json["fallback_used"], true);

    let (status, _) = send(&app, Method::POST, "/speech", Some(json!({"text": "  "}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_body_gets_error_json() {
    let app = app();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/chat")
        .header("content-type", "application/json")
        .body(Body::from("{\"query\": "))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["error"], "invalid_request");
    assert!(!json["message"].as_str().unwrap().is_empty());

    let (status, json) = send(&app, Method::POST, "/avatar-step", Some(json!({"step": "welcome"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "invalid_request");
}

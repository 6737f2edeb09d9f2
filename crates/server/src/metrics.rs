//! Prometheus metrics

use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

use avatar_flow::FlowKind;

static HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Install the global Prometheus recorder
///
/// Safe to call more than once; later calls return the first handle.
pub fn init_metrics() -> Option<PrometheusHandle> {
    HANDLE
        .get_or_try_init(|| PrometheusBuilder::new().install_recorder())
        .map(Clone::clone)
        .map_err(|e| tracing::warn!(error = %e, "Failed to install Prometheus recorder"))
        .ok()
}

/// GET /metrics
pub async fn metrics_handler() -> impl IntoResponse {
    match HANDLE.get() {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        ),
        None => (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "text/plain")],
            "metrics disabled".to_string(),
        ),
    }
}

pub fn record_chat(reply: &'static str) {
    ::metrics::counter!("avatar_chat_requests_total", "reply" => reply).increment(1);
}

pub fn record_flow_step(flow: FlowKind, outcome: &'static str) {
    ::metrics::counter!(
        "avatar_flow_steps_total",
        "flow" => flow.as_str(),
        "outcome" => outcome
    )
    .increment(1);
}

pub fn record_fallback(service: &'static str) {
    ::metrics::counter!("avatar_service_fallbacks_total", "service" => service).increment(1);
}

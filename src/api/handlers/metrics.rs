use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use metrics::gauge;

use crate::classifier::ClassifierPhase;
use crate::AppState;

/// GET /metrics — Prometheus scrape payload.
pub async fn render(State(state): State<AppState>) -> impl IntoResponse {
    // Phase changes at most once; sampled per scrape.
    let ready = state.gateway.phase() == ClassifierPhase::Ready;
    gauge!("classifier_ready").set(if ready { 1.0 } else { 0.0 });

    let body = state.metrics_handle.render();
    ([(CONTENT_TYPE, "text/plain; version=0.0.4")], body)
}

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::auth::require_auth;
use super::handlers;
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    // Public routes — no authentication required
    let public = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/metrics", get(handlers::metrics::render));

    // Screening API — requires Bearer token when API_TOKEN is set
    let protected = Router::new()
        .route("/api/check", post(handlers::check::check))
        .route("/api/classify", post(handlers::check::classify))
        .route("/api/batch", post(handlers::batch::analyze))
        .route("/api/chat", post(handlers::chat::reply))
        .route("/api/chat/greeting", get(handlers::chat::greeting))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    // Browser front-ends call this API directly
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    public
        .merge(protected)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

use super::{
    handlers::{detect, health},
    middleware::request_id::request_id_middleware,
    state::AppState,
};
use axum::{
    Router, middleware,
    routing::{get, post},
};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health (bare path for infra probes, /api prefix for the frontend poll)
        .route("/health", get(health::health_check))
        .route("/api/health", get(health::health_check))
        // Detection
        .route("/api/detect", post(detect::detect_image))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

use crate::presentation::http::state::AppState;
use axum::{Json, extract::State, response::IntoResponse};
use serde::Serialize;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    message: String,
}

/// Liveness probe polled by the uploader frontend.
///
/// No upstream round trip happens here; the workflow endpoint is only
/// contacted on detection requests.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "online",
        message: format!(
            "Detection API is live, forwarding to workflow {}/{}",
            state.config.roboflow_workspace, state.config.roboflow_workflow_id
        ),
    })
}

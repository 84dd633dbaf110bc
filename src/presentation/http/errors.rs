//! HTTP error handling and response conversion.
//!
//! Handler errors are mapped to HTTP status codes and a stable JSON envelope
//! `{"error": true, "detail": <message>, "status": <code>}` that the uploader
//! frontend keys on. Upstream workflow failures keep the remote status and
//! body visible in the detail instead of collapsing into a generic failure.

use crate::domain::detection::WorkflowError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

/// Application-level errors returned from handlers.
///
/// Each variant maps to a specific HTTP status code and error category.
#[derive(Debug)]
pub enum ApiError {
    /// Request validation failed (400).
    BadRequest(String),

    /// Workflow endpoint was reachable but reported a failure status (502).
    UpstreamRejected { status: StatusCode, body: String },

    /// Workflow endpoint unreachable, timed out, or its reply was
    /// undecodable (500).
    Upstream(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::UpstreamRejected { status, body } => {
                write!(f, "Workflow rejected request with status {}: {}", status, body)
            }
            Self::Upstream(msg) => write!(f, "Workflow call failed: {}", msg),
        }
    }
}

impl ApiError {
    /// Get the appropriate HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::UpstreamRejected { .. } => StatusCode::BAD_GATEWAY,
            Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Caller-visible detail line for the error envelope.
    fn detail(&self) -> String {
        match self {
            Self::BadRequest(msg) => msg.clone(),
            Self::UpstreamRejected { status, body } => {
                format!("AI model error (upstream status {}): {}", status.as_u16(), body)
            }
            Self::Upstream(msg) => format!("Workflow call failed: {}", msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let detail = self.detail();

        match status {
            StatusCode::INTERNAL_SERVER_ERROR | StatusCode::BAD_GATEWAY => {
                tracing::error!("error={}", self);
            }
            _ => {
                tracing::warn!("error={}", self);
            }
        }

        (
            status,
            Json(json!({
                "error": true,
                "detail": detail,
                "status": status.as_u16(),
            })),
        )
            .into_response()
    }
}

// === Workflow Error Conversion ===

impl From<WorkflowError> for ApiError {
    fn from(err: WorkflowError) -> Self {
        match err {
            WorkflowError::Remote { status, body } => ApiError::UpstreamRejected { status, body },
            WorkflowError::Transport(source) => ApiError::Upstream(source.to_string()),
        }
    }
}

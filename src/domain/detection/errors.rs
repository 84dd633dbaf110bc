use reqwest::StatusCode;
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure modes of a single workflow submission.
///
/// `Remote` means the endpoint answered with a non-success status; it keeps
/// the exact status and raw body so the caller sees what the workflow said.
/// `Transport` covers everything below that: connect errors, timeouts,
/// staging I/O and undecodable success bodies.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("workflow endpoint returned status {status}: {body}")]
    Remote { status: StatusCode, body: String },

    #[error("workflow transport failed: {0}")]
    Transport(#[source] BoxError),
}

impl From<reqwest::Error> for WorkflowError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(Box::new(err))
    }
}

impl From<std::io::Error> for WorkflowError {
    fn from(err: std::io::Error) -> Self {
        Self::Transport(Box::new(err))
    }
}

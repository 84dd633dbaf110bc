use crate::domain::detection::{DetectionRequest, WorkflowError, WorkflowResult};
use async_trait::async_trait;

/// Boundary to the remotely hosted inference workflow.
///
/// Handlers depend on this trait rather than on a concrete vendor client, so
/// tests can substitute doubles for the remote endpoint.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorkflowClient: Send + Sync {
    /// Run the configured workflow against one image, returning its JSON
    /// response verbatim or a classified failure. Exactly one outbound call
    /// is made per invocation; there are no retries.
    async fn detect(&self, request: DetectionRequest) -> Result<WorkflowResult, WorkflowError>;
}

use super::staging::StagedFile;
use super::traits::WorkflowClient;
use crate::config::{Config, WorkflowTransport};
use crate::domain::detection::{DetectionRequest, WorkflowError, WorkflowResult};
use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use reqwest::multipart::{Form, Part};
use std::path::PathBuf;
use std::time::Duration;

/// Client for Roboflow-hosted workflows.
///
/// Built once at startup; the inner `reqwest::Client` carries the configured
/// timeout and is safe to share across concurrent requests. Each `detect`
/// call makes a single POST to the workflow URL and classifies the outcome.
pub struct RoboflowClient {
    http: reqwest::Client,
    api_url: String,
    workspace: String,
    workflow_id: String,
    api_key: String,
    transport: WorkflowTransport,
    use_cache: bool,
    staging_dir: PathBuf,
}

impl RoboflowClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.workflow_timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            api_url: config.roboflow_api_url.trim_end_matches('/').to_string(),
            workspace: config.roboflow_workspace.clone(),
            workflow_id: config.roboflow_workflow_id.clone(),
            api_key: config.roboflow_api_key.clone(),
            transport: config.workflow_transport,
            use_cache: config.workflow_use_cache,
            staging_dir: config.staging_dir.clone(),
        })
    }

    fn workflow_url(&self) -> String {
        format!(
            "{}/workflow/{}/{}",
            self.api_url, self.workspace, self.workflow_id
        )
    }

    /// JSON body with the image inlined as base64.
    async fn send_inline(
        &self,
        request: &DetectionRequest,
    ) -> Result<reqwest::Response, WorkflowError> {
        let payload = serde_json::json!({
            "api_key": self.api_key,
            "inputs": {
                "image": {
                    "type": "base64",
                    "value": STANDARD.encode(request.bytes()),
                }
            }
        });

        Ok(self
            .http
            .post(self.workflow_url())
            .json(&payload)
            .send()
            .await?)
    }

    /// Multipart upload fed from a staged temporary file. The staging guard
    /// drops when this returns, removing the file on every exit path.
    async fn send_staged(
        &self,
        request: &DetectionRequest,
    ) -> Result<reqwest::Response, WorkflowError> {
        let staged =
            StagedFile::create(&self.staging_dir, request.filename_hint(), request.bytes()).await?;

        let contents = tokio::fs::read(staged.path()).await?;
        let part = Part::bytes(contents)
            .file_name(staged.file_name().to_string())
            .mime_str("application/octet-stream")?;
        let form = Form::new()
            .text("api_key", self.api_key.clone())
            .text("use_cache", self.use_cache.to_string())
            .part("image", part);

        Ok(self
            .http
            .post(self.workflow_url())
            .multipart(form)
            .send()
            .await?)
    }
}

#[async_trait]
impl WorkflowClient for RoboflowClient {
    async fn detect(&self, request: DetectionRequest) -> Result<WorkflowResult, WorkflowError> {
        let response = match self.transport {
            WorkflowTransport::Base64 => self.send_inline(&request).await?,
            WorkflowTransport::StagedFile => self.send_staged(&request).await?,
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, "workflow endpoint rejected request: {}", body);
            return Err(WorkflowError::Remote { status, body });
        }

        let result = WorkflowResult::new(response.json().await?);
        tracing::info!("workflow success: {} result(s) returned", result.result_count());
        Ok(result)
    }
}

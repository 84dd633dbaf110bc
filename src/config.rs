//! Application configuration loading from environment variables.
//!
//! All configuration is loaded from the environment at startup via standard `std::env::var`,
//! so the service can be configured the 12-factor way in containerized and serverless
//! deployments. A `.env` file is honored in development through `dotenvy`.
//!
//! # Environment Variables
//!
//! ## Required Variables
//! - `ROBOFLOW_API_KEY`: API key for the hosted workflow endpoint
//! - `ROBOFLOW_WORKSPACE`: workspace that owns the workflow
//! - `ROBOFLOW_WORKFLOW_ID`: id of the workflow to run
//!
//! ## Optional Variables
//! - `RUST_LOG`: logging filter (default: "info,faucet_finder=debug,tower_http=debug")
//! - `ROBOFLOW_API_URL`: workflow endpoint base URL (default: "https://detect.roboflow.com")
//! - `WORKFLOW_TRANSPORT`: "base64" or "staged-file" (default: "base64")
//! - `WORKFLOW_TIMEOUT_SECONDS`: outbound request timeout (default: 30)
//! - `WORKFLOW_USE_CACHE`: ask the endpoint to reuse cached workflow state,
//!   staged-file transport only (default: true)
//! - `STAGING_DIR`: directory for transient image files (default: OS temp dir)
//! - `HOST`: server bind address (default: "0.0.0.0")
//! - `PORT`: server port (default: 8000)

use serde::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;

/// How image bytes travel to the workflow endpoint.
///
/// The hosted service accepts either a JSON body with the image inlined as
/// base64 or a multipart upload fed from a staged local file; both forms hit
/// the same workflow URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkflowTransport {
    /// JSON body with the image inlined as a base64 string.
    Base64,
    /// Multipart upload fed from a uniquely named temporary file.
    StagedFile,
}

impl FromStr for WorkflowTransport {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "base64" | "inline" => Ok(Self::Base64),
            "staged-file" | "staged_file" | "file" => Ok(Self::StagedFile),
            other => Err(format!(
                "unknown workflow transport '{}', expected 'base64' or 'staged-file'",
                other
            )),
        }
    }
}

/// Complete server configuration loaded from environment.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// API key for the hosted workflow endpoint (never hard-coded)
    pub roboflow_api_key: String,

    /// Workspace that owns the workflow (e.g., `neura-global`)
    pub roboflow_workspace: String,

    /// Workflow id within the workspace (e.g., `find-faucets`)
    pub roboflow_workflow_id: String,

    /// Base URL of the workflow endpoint
    pub roboflow_api_url: String,

    /// Wire transport for the image payload
    pub workflow_transport: WorkflowTransport,

    /// Timeout applied to the single outbound workflow call, in seconds
    pub workflow_timeout_seconds: u64,

    /// Whether the staged-file transport asks the endpoint to reuse cached
    /// workflow state
    pub workflow_use_cache: bool,

    /// Directory where staged image files are created
    pub staging_dir: PathBuf,

    /// Server bind address
    pub host: String,

    /// Server port
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any required environment variable is missing or
    /// cannot be parsed to the expected type.
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            roboflow_api_key: env_required("ROBOFLOW_API_KEY")?,
            roboflow_workspace: env_required("ROBOFLOW_WORKSPACE")?,
            roboflow_workflow_id: env_required("ROBOFLOW_WORKFLOW_ID")?,
            roboflow_api_url: env_or(
                "ROBOFLOW_API_URL",
                "https://detect.roboflow.com".to_string(),
            )?,
            workflow_transport: env_or("WORKFLOW_TRANSPORT", WorkflowTransport::Base64)?,
            workflow_timeout_seconds: env_or("WORKFLOW_TIMEOUT_SECONDS", 30)?,
            workflow_use_cache: env_or("WORKFLOW_USE_CACHE", true)?,
            staging_dir: env_or("STAGING_DIR", std::env::temp_dir())?,
            host: env_or("HOST", "0.0.0.0".to_string())?,
            port: env_or("PORT", 8000)?,
        })
    }
}

/// Load a required environment variable.
///
/// # Errors
///
/// Returns an error if the variable is not set.
fn env_required(key: &str) -> anyhow::Result<String> {
    std::env::var(key).map_err(|_| anyhow::anyhow!("Missing required environment variable: {}", key))
}

/// Load an environment variable with a default value.
///
/// Returns the parsed environment variable if set, otherwise returns the default.
///
/// # Errors
///
/// Returns an error if the variable is set but cannot be parsed.
fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(val) => val
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", key, e)),
        Err(_) => Ok(default),
    }
}

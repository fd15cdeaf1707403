// Review backend access.
//
// The backend exposes two endpoints: a multipart PDF upload that returns a
// generated prompt plus the extracted paper text, and a JSON endpoint that
// turns prompt + paper text into a review. `ReviewBackend` is the seam the
// app orchestrator talks through; `ApiClient` picks the HTTP or demo
// implementation from config.

pub mod client;
pub mod demo;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{ApiMode, Config};
use crate::protocol::ReviewVersion;

pub use client::HttpBackend;
pub use demo::DemoBackend;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Success body of `POST /submit-pdf-text`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PromptResponse {
    /// `"success"` on the happy path; informational only.
    #[serde(default)]
    pub state: Option<String>,
    pub gen_prompt: String,
    pub paper_content: String,
}

/// JSON body of `POST /generate-review`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewRequest {
    pub paper_content: String,
    pub prompt: String,
    pub version: String,
}

impl ReviewRequest {
    pub fn new(paper_content: &str, prompt: &str, version: ReviewVersion) -> Self {
        ReviewRequest {
            paper_content: paper_content.to_string(),
            prompt: prompt.to_string(),
            version: version.as_str().to_string(),
        }
    }
}

/// Success body of `POST /generate-review`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReviewResponse {
    pub gen_review: String,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("failed to decode backend response: {0}")]
    Decode(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// ReviewBackend
// ---------------------------------------------------------------------------

/// The two operations the client needs from a review backend.
#[async_trait]
pub trait ReviewBackend: Send + Sync {
    /// Upload a PDF and get back a generated prompt and the extracted text.
    async fn submit_pdf(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        version: ReviewVersion,
    ) -> Result<PromptResponse, ApiError>;

    /// Generate a review from a prompt and previously extracted paper text.
    async fn generate_review(&self, request: &ReviewRequest) -> Result<ReviewResponse, ApiError>;
}

// ---------------------------------------------------------------------------
// ApiClient wrapper
// ---------------------------------------------------------------------------

/// Backend selected from config: real HTTP or local canned answers.
pub enum ApiClient {
    Http(HttpBackend),
    Demo(DemoBackend),
}

impl ApiClient {
    /// Build the backend named by `api.mode`.
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        match config.api.mode {
            ApiMode::Http => Ok(ApiClient::Http(HttpBackend::new(
                &config.api.base_url,
                config.api.request_timeout_secs,
            )?)),
            ApiMode::Demo => Ok(ApiClient::Demo(DemoBackend)),
        }
    }
}

#[async_trait]
impl ReviewBackend for ApiClient {
    async fn submit_pdf(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        version: ReviewVersion,
    ) -> Result<PromptResponse, ApiError> {
        match self {
            ApiClient::Http(backend) => backend.submit_pdf(file_name, bytes, version).await,
            ApiClient::Demo(backend) => backend.submit_pdf(file_name, bytes, version).await,
        }
    }

    async fn generate_review(&self, request: &ReviewRequest) -> Result<ReviewResponse, ApiError> {
        match self {
            ApiClient::Http(backend) => backend.generate_review(request).await,
            ApiClient::Demo(backend) => backend.generate_review(request).await,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

// HTTP client for the review backend.
//
// `POST /submit-pdf-text` takes multipart form data (`pdfFile`, `version`)
// and `POST /generate-review` takes JSON. Both answer JSON; failures carry
// `{ "error": "..." }` with a non-2xx status.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::{ApiError, PromptResponse, ReviewBackend, ReviewRequest, ReviewResponse};
use crate::protocol::ReviewVersion;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const SUBMIT_PDF_PATH: &str = "/submit-pdf-text";
const GENERATE_REVIEW_PATH: &str = "/generate-review";
const PDF_MIME: &str = "application/pdf";

// ---------------------------------------------------------------------------
// HttpBackend
// ---------------------------------------------------------------------------

/// Talks to a running review backend over HTTP.
pub struct HttpBackend {
    http: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    /// Create a client for `base_url`. A `timeout_secs` of zero leaves
    /// requests without a deadline.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(timeout_secs));
        }
        Ok(Self {
            http: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl ReviewBackend for HttpBackend {
    async fn submit_pdf(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        version: ReviewVersion,
    ) -> Result<PromptResponse, ApiError> {
        debug!(file_name, size = bytes.len(), %version, "submitting PDF");
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(PDF_MIME)?;
        let form = Form::new()
            .part("pdfFile", part)
            .text("version", version.as_str());

        let response = self
            .http
            .post(self.endpoint(SUBMIT_PDF_PATH))
            .multipart(form)
            .send()
            .await?;

        read_json(response).await
    }

    async fn generate_review(&self, request: &ReviewRequest) -> Result<ReviewResponse, ApiError> {
        debug!(
            version = %request.version,
            prompt_len = request.prompt.len(),
            paper_len = request.paper_content.len(),
            "requesting review"
        );
        let response = self
            .http
            .post(self.endpoint(GENERATE_REVIEW_PATH))
            .json(request)
            .send()
            .await?;

        read_json(response).await
    }
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

/// Decode a success body, or turn a non-2xx response into `ApiError::Status`.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(ApiError::Status {
            status: status.as_u16(),
            message: extract_error_message(&body),
        });
    }

    Ok(serde_json::from_str(&body)?)
}

/// Pull the backend's `error` field out of a failure body, falling back to
/// the raw body text.
pub(crate) fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error")?.as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_from_backend_json() {
        let body = r#"{"error": "Failed to parse PDF into JSON"}"#;
        assert_eq!(extract_error_message(body), "Failed to parse PDF into JSON");
    }

    #[test]
    fn error_message_falls_back_to_raw_body() {
        assert_eq!(
            extract_error_message("  Internal Server Error\n"),
            "Internal Server Error"
        );
    }

    #[test]
    fn error_message_ignores_non_string_error_field() {
        let body = r#"{"error": 42}"#;
        assert_eq!(extract_error_message(body), body);
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let backend = HttpBackend::new("http://localhost:3001/", 0).unwrap();
        assert_eq!(
            backend.endpoint(SUBMIT_PDF_PATH),
            "http://localhost:3001/submit-pdf-text"
        );
        assert_eq!(
            backend.endpoint(GENERATE_REVIEW_PATH),
            "http://localhost:3001/generate-review"
        );
    }

    #[test]
    fn builds_with_timeout() {
        assert!(HttpBackend::new("http://localhost:3001", 30).is_ok());
    }
}

// Offline backend that answers with fixed text per version.
//
// Lets the whole workflow run without a review server (config
// `api.mode = "demo"`).

use async_trait::async_trait;
use tracing::info;

use super::{ApiError, PromptResponse, ReviewBackend, ReviewRequest, ReviewResponse};
use crate::protocol::ReviewVersion;

pub const DEMO_PAPER_CONTENT: &str = "Simulated paper content for demonstration purposes.";

const DEFAULT_PROMPT: &str = "Default Version Prompt: Summarize the main findings of the paper.";
const DEFAULT_REVIEW: &str =
    "Default Version Review: The paper provides a concise overview of current AI trends.";
const DETAILED_PROMPT: &str = "Detailed Version Prompt: Provide a detailed analysis of the \
    paper's methodology and its implications in the field of AI.";
const DETAILED_REVIEW: &str = "Detailed Version Review: This paper extensively discusses \
    advanced AI methodologies and their potential impact on future technologies, highlighting \
    several areas for improvement and further research.";

#[derive(Debug, Clone, Copy, Default)]
pub struct DemoBackend;

impl DemoBackend {
    pub fn prompt_for(version: ReviewVersion) -> &'static str {
        match version {
            ReviewVersion::Default => DEFAULT_PROMPT,
            ReviewVersion::Detailed => DETAILED_PROMPT,
        }
    }

    pub fn review_for(version: ReviewVersion) -> &'static str {
        match version {
            ReviewVersion::Default => DEFAULT_REVIEW,
            ReviewVersion::Detailed => DETAILED_REVIEW,
        }
    }
}

#[async_trait]
impl ReviewBackend for DemoBackend {
    async fn submit_pdf(
        &self,
        file_name: &str,
        _bytes: Vec<u8>,
        version: ReviewVersion,
    ) -> Result<PromptResponse, ApiError> {
        info!(file_name, %version, "demo backend: canned prompt");
        Ok(PromptResponse {
            state: Some("success".to_string()),
            gen_prompt: Self::prompt_for(version).to_string(),
            paper_content: DEMO_PAPER_CONTENT.to_string(),
        })
    }

    async fn generate_review(&self, request: &ReviewRequest) -> Result<ReviewResponse, ApiError> {
        // Unknown versions fall back to the default text like the server does.
        let version: ReviewVersion = request.version.parse().unwrap_or_default();
        info!(%version, "demo backend: canned review");
        Ok(ReviewResponse {
            gen_review: Self::review_for(version).to_string(),
        })
    }
}

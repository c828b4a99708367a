use crate::{
    config::GeminiConfig,
    dto::{GeminiRequest, GenerationRequest},
    prompt::build_prompt,
};

use reqwest::{StatusCode, header::CONTENT_TYPE};
use serde_json::Value;

pub struct ReplyGenerator {
    endpoint: String,
    client: reqwest::Client,
}

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(reqwest::Error),

    #[error("Failed to reach generation endpoint: {0}")]
    Transport(reqwest::Error),

    #[error("Generation endpoint returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    // Display doubles as the reply text callers receive in compatible mode.
    #[error("Error processing the request {0}")]
    Extraction(#[from] ExtractError),
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("response contains no candidates")]
    NoCandidates,

    #[error("first candidate contains no parts")]
    NoParts,

    #[error("first part contains no text")]
    NoText,
}

/// Pulls `candidates[0].content.parts[0].text` out of a raw provider response.
/// Nothing past the first candidate and first part is looked at.
pub fn extract_reply(body: &str) -> Result<String, ExtractError> {
    let response: Value = serde_json::from_str(body)?;

    let candidate = response
        .get("candidates")
        .and_then(|c| c.get(0))
        .ok_or(ExtractError::NoCandidates)?;

    let part = candidate
        .get("content")
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.get(0))
        .ok_or(ExtractError::NoParts)?;

    part.get("text")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(ExtractError::NoText)
}

impl ReplyGenerator {
    pub fn new(config: GeminiConfig) -> Result<Self, GenerateError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(GenerateError::ClientBuild)?;

        Ok(Self {
            endpoint: format!("{}{}", config.api_url, config.api_key),
            client,
        })
    }

    /// Generates a reply, keeping every failure kind distinct.
    pub async fn try_generate(&self, request: GenerationRequest) -> Result<String, GenerateError> {
        let prompt = build_prompt(&request);

        tracing::info!(
            "Requesting reply generation ({} prompt bytes, tone: {:?})",
            prompt.len(),
            request.tone
        );

        // The endpoint embeds the API key, so errors are stripped of their URL.
        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .json(&GeminiRequest::from_prompt(prompt))
            .send()
            .await
            .map_err(|e| GenerateError::Transport(e.without_url()))?;

        let status = response.status();
        tracing::debug!("Generation endpoint responded with {}", status);

        let body = response
            .text()
            .await
            .map_err(|e| GenerateError::Transport(e.without_url()))?;

        if !status.is_success() {
            return Err(GenerateError::Status { status, body });
        }

        extract_reply(&body).map_err(|e| {
            tracing::warn!("Could not extract reply from generation response: {}", e);
            GenerateError::Extraction(e)
        })
    }

    /// Generates a reply the way existing callers expect it: an unreadable
    /// response comes back as `Ok` carrying an "Error processing the request"
    /// message, while transport and status failures stay `Err`.
    pub async fn generate(&self, request: GenerationRequest) -> Result<String, GenerateError> {
        match self.try_generate(request).await {
            Err(e @ GenerateError::Extraction(_)) => Ok(e.to_string()),
            other => other,
        }
    }
}

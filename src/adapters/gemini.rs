use crate::config::SiteConfig;
use crate::domain::ports::TextGenerator;
use crate::utils::error::{Result, SiteError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Client for a Gemini-style `generateContent` endpoint. One POST per
/// attempt; retries live in the blueprint service, not here.
#[derive(Debug)]
pub struct GeminiClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
    timeout: Duration,
}

impl GeminiClient {
    /// Fails up front when no usable credential is configured, so a
    /// misconfigured deployment never reaches the retry loop.
    pub fn from_config(config: &SiteConfig) -> Result<Self> {
        let api_key = config
            .generator_api_key()
            .ok_or(SiteError::MissingCredential {
                service: "generative",
            })?
            .to_string();

        Ok(Self {
            client: Client::new(),
            endpoint: config.generator.endpoint.clone(),
            model: config.generator.model.clone(),
            api_key,
            timeout: config.generator.attempt_timeout(),
        })
    }

    fn request_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: prompt.to_string(),
                }],
            }],
        };

        tracing::debug!(model = %self.model, "Calling generative API");

        let response = self
            .client
            .post(self.request_url())
            .header("x-goog-api-key", &self.api_key)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(status = %status, "Generative API responded");

        if !status.is_success() {
            return Err(SiteError::UpstreamStatus {
                status: status.as_u16(),
            });
        }

        // The envelope is navigated through typed optional fields; any
        // shape deviation collapses to the same retryable error.
        let envelope: GenerateContentResponse = response
            .json()
            .await
            .map_err(|_| SiteError::MalformedResponse)?;

        envelope.first_text().ok_or(SiteError::MalformedResponse)
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// `candidates[0].content.parts[0].text`, or None anywhere along the
    /// path.
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
    }
}

//! Content generator backed by the Gemini generateContent API

use async_trait::async_trait;
use tracing::debug;

use shared::ApiFailure;
use crate::config::{endpoint_url, GeneratorConfig};
use crate::error::{GeneratorError, GeneratorResult};
use crate::traits::ContentGenerator;

/// Real content generator issuing one request per prompt, no retries
pub struct RealContentGenerator {
    client: reqwest::Client,
    config: GeneratorConfig,
}

impl RealContentGenerator {
    /// Create new content generator
    pub fn new(config: GeneratorConfig) -> GeneratorResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|e| GeneratorError::Config { message: format!("Failed to build HTTP client: {e}") })?;
        Ok(Self { client, config })
    }

    fn request_url(&self) -> String {
        endpoint_url(
            &self.config.generator_endpoint,
            &format!("v1beta/models/{}:generateContent", self.config.generator_model),
        )
    }
}

#[async_trait]
impl ContentGenerator for RealContentGenerator {
    async fn synthesize(&self, prompt: &str) -> Result<String, ApiFailure> {
        let request_start = std::time::Instant::now();

        let request_body = serde_json::json!({
            "contents": [
                {
                    "parts": [
                        {
                            "text": prompt
                        }
                    ]
                }
            ]
        });

        let response = self
            .client
            .post(self.request_url())
            .header("x-goog-api-key", &self.config.generator_api_key)
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ApiFailure::Timeout
                } else {
                    ApiFailure::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiFailure::from_status(status.as_u16(), body));
        }

        let response_json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ApiFailure::InvalidResponse(format!("Failed to parse response: {e}")))?;

        let text = extract_text(&response_json).ok_or(ApiFailure::EmptyResponse)?;

        debug!(
            model = %self.config.generator_model,
            elapsed_ms = request_start.elapsed().as_millis() as u64,
            chars = text.len(),
            "generator responded"
        );
        Ok(text)
    }
}

/// Concatenate the text parts of the first candidate; `None` when blank
fn extract_text(response_json: &serde_json::Value) -> Option<String> {
    let parts = response_json
        .get("candidates")
        .and_then(|candidates| candidates.get(0))
        .and_then(|candidate| candidate.get("content"))
        .and_then(|content| content.get("parts"))
        .and_then(|parts| parts.as_array())?;

    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
        .collect();

    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

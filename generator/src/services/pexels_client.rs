//! Image source backed by the Pexels search API

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::{endpoint_url, GeneratorConfig};
use crate::error::{GeneratorError, GeneratorResult};
use crate::traits::ImageSource;

/// Real image source; every failure becomes "no image"
pub struct RealImageSource {
    client: reqwest::Client,
    config: GeneratorConfig,
}

impl RealImageSource {
    /// Create new image source
    pub fn new(config: GeneratorConfig) -> GeneratorResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|e| GeneratorError::Config { message: format!("Failed to build HTTP client: {e}") })?;
        Ok(Self { client, config })
    }

    async fn search(&self, hint: &str) -> Result<Option<String>, String> {
        let response = self
            .client
            .get(endpoint_url(&self.config.image_endpoint, "v1/search"))
            .header("Authorization", &self.config.image_api_key)
            .query(&[("query", hint), ("per_page", "1")])
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if !response.status().is_success() {
            return Err(format!("HTTP {}", response.status()));
        }

        let response_json: serde_json::Value = response.json().await.map_err(|e| e.to_string())?;

        Ok(response_json
            .get("photos")
            .and_then(|photos| photos.get(0))
            .and_then(|photo| photo.get("src"))
            .and_then(|src| src.get("medium"))
            .and_then(|medium| medium.as_str())
            .map(str::to_string))
    }
}

#[async_trait]
impl ImageSource for RealImageSource {
    async fn find_image(&self, hint: &str) -> Option<String> {
        let hint = hint.trim();
        if hint.is_empty() {
            return None;
        }

        match self.search(hint).await {
            Ok(Some(url)) => Some(url),
            Ok(None) => {
                debug!(hint, "no image found");
                None
            }
            Err(reason) => {
                warn!(hint, reason = %reason, "image lookup failed");
                None
            }
        }
    }
}

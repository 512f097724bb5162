//! Injected configuration for the external provider clients

use std::env;
use std::time::Duration;

use url::Url;

use crate::error::{GeneratorError, GeneratorResult};

pub const DEFAULT_GENERATOR_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_IMAGE_ENDPOINT: &str = "https://api.pexels.com";
pub const DEFAULT_GENERATOR_MODEL: &str = "gemini-pro";

/// Provider credentials and endpoints; secrets never have defaults
#[derive(Clone)]
pub struct GeneratorConfig {
    pub generator_api_key: String,
    pub image_api_key: String,
    pub generator_endpoint: Url,
    pub image_endpoint: Url,
    pub generator_model: String,
    /// Per-call HTTP timeout for both clients
    pub http_timeout: Duration,
    /// Upper bound for one whole generation request
    pub request_deadline: Duration,
}

impl std::fmt::Debug for GeneratorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorConfig")
            .field("generator_api_key", &"<redacted>")
            .field("image_api_key", &"<redacted>")
            .field("generator_endpoint", &self.generator_endpoint.as_str())
            .field("image_endpoint", &self.image_endpoint.as_str())
            .field("generator_model", &self.generator_model)
            .field("http_timeout", &self.http_timeout)
            .field("request_deadline", &self.request_deadline)
            .finish()
    }
}

impl GeneratorConfig {
    /// Config against the public provider endpoints
    pub fn new(generator_api_key: impl Into<String>, image_api_key: impl Into<String>) -> GeneratorResult<Self> {
        let config = Self {
            generator_api_key: generator_api_key.into(),
            image_api_key: image_api_key.into(),
            generator_endpoint: parse_endpoint("generator_endpoint", DEFAULT_GENERATOR_ENDPOINT)?,
            image_endpoint: parse_endpoint("image_endpoint", DEFAULT_IMAGE_ENDPOINT)?,
            generator_model: DEFAULT_GENERATOR_MODEL.to_string(),
            http_timeout: Duration::from_secs(60),
            request_deadline: Duration::from_secs(120),
        };
        config.validate()?;
        Ok(config)
    }

    /// Load from the process environment (and `.env` when present)
    pub fn from_env() -> GeneratorResult<Self> {
        let _ = dotenvy::dotenv();

        let mut config = Self::new(required_var("GEMINI_API_KEY")?, required_var("PEXELS_API_KEY")?)?;

        if let Ok(endpoint) = env::var("GEMINI_API_ENDPOINT") {
            config.generator_endpoint = parse_endpoint("GEMINI_API_ENDPOINT", &endpoint)?;
        }
        if let Ok(endpoint) = env::var("PEXELS_API_ENDPOINT") {
            config.image_endpoint = parse_endpoint("PEXELS_API_ENDPOINT", &endpoint)?;
        }
        if let Ok(model) = env::var("GEMINI_API_MODEL") {
            config.generator_model = model;
        }
        if let Some(secs) = optional_secs("GENERATOR_HTTP_TIMEOUT_SECS")? {
            config.http_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = optional_secs("GENERATOR_DEADLINE_SECS")? {
            config.request_deadline = Duration::from_secs(secs);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_generator_endpoint(mut self, endpoint: &str) -> GeneratorResult<Self> {
        self.generator_endpoint = parse_endpoint("generator_endpoint", endpoint)?;
        Ok(self)
    }

    pub fn with_image_endpoint(mut self, endpoint: &str) -> GeneratorResult<Self> {
        self.image_endpoint = parse_endpoint("image_endpoint", endpoint)?;
        Ok(self)
    }

    pub fn with_request_deadline(mut self, deadline: Duration) -> Self {
        self.request_deadline = deadline;
        self
    }

    pub fn validate(&self) -> GeneratorResult<()> {
        if self.generator_api_key.trim().is_empty() {
            return Err(config_error("generator API key is empty"));
        }
        if self.image_api_key.trim().is_empty() {
            return Err(config_error("image API key is empty"));
        }
        if self.generator_model.trim().is_empty() {
            return Err(config_error("generator model is empty"));
        }
        if self.request_deadline.is_zero() {
            return Err(config_error("request deadline must be positive"));
        }
        Ok(())
    }
}

fn config_error(message: impl Into<String>) -> GeneratorError {
    GeneratorError::Config { message: message.into() }
}

fn required_var(name: &str) -> GeneratorResult<String> {
    env::var(name).map_err(|_| config_error(format!("{name} must be set")))
}

fn optional_secs(name: &str) -> GeneratorResult<Option<u64>> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| config_error(format!("{name} must be a whole number of seconds, got {raw:?}"))),
        Err(_) => Ok(None),
    }
}

fn parse_endpoint(field: &str, raw: &str) -> GeneratorResult<Url> {
    let url = Url::parse(raw).map_err(|e| config_error(format!("{field} is not a valid URL ({raw}): {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(config_error(format!("{field} must use http or https, got {other}"))),
    }
}

/// Join a path onto an endpoint without dropping any base path segment
pub(crate) fn endpoint_url(base: &Url, path: &str) -> String {
    format!("{}/{}", base.as_str().trim_end_matches('/'), path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_public_endpoints() {
        let config = GeneratorConfig::new("gen-key", "img-key").unwrap();
        assert_eq!(config.generator_endpoint.as_str(), "https://generativelanguage.googleapis.com/");
        assert_eq!(config.image_endpoint.as_str(), "https://api.pexels.com/");
        assert_eq!(config.generator_model, DEFAULT_GENERATOR_MODEL);
    }

    #[test]
    fn test_empty_keys_rejected() {
        assert!(matches!(GeneratorConfig::new("", "img"), Err(GeneratorError::Config { .. })));
        assert!(matches!(GeneratorConfig::new("gen", "  "), Err(GeneratorError::Config { .. })));
    }

    #[test]
    fn test_endpoint_overrides_validated() {
        let config = GeneratorConfig::new("gen", "img").unwrap();
        assert!(config.clone().with_generator_endpoint("ftp://example.com").is_err());
        assert!(config.clone().with_image_endpoint("not a url").is_err());

        let config = config.with_image_endpoint("http://127.0.0.1:9000").unwrap();
        assert_eq!(config.image_endpoint.as_str(), "http://127.0.0.1:9000/");
    }

    #[test]
    fn test_debug_redacts_keys() {
        let config = GeneratorConfig::new("secret-gen", "secret-img").unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("secret-gen"));
        assert!(!rendered.contains("secret-img"));
    }

    #[test]
    fn test_endpoint_url_joins_paths() {
        let base = Url::parse("http://localhost:8080/proxy/").unwrap();
        assert_eq!(endpoint_url(&base, "/v1/search"), "http://localhost:8080/proxy/v1/search");
    }

    #[test]
    fn test_zero_deadline_rejected() {
        let config = GeneratorConfig::new("gen", "img").unwrap().with_request_deadline(Duration::ZERO);
        assert!(config.validate().is_err());
    }
}

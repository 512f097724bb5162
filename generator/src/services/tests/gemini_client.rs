//! Tests for RealContentGenerator against a mock HTTP server

use std::time::Duration;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shared::ApiFailure;
use crate::config::GeneratorConfig;
use crate::services::gemini_client::RealContentGenerator;
use crate::traits::ContentGenerator;

const GENERATE_PATH: &str = "/v1beta/models/gemini-pro:generateContent";

fn generator_for(server: &MockServer) -> RealContentGenerator {
    let config = GeneratorConfig::new("gen-key", "img-key")
        .unwrap()
        .with_generator_endpoint(&server.uri())
        .unwrap();
    RealContentGenerator::new(config).unwrap()
}

#[tokio::test]
async fn test_synthesize_returns_candidate_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", "gen-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"parts": [{"text": "{\"posts\": []}"}]}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let text = generator_for(&server).synthesize("Write about tea").await.unwrap();
    assert_eq!(text, "{\"posts\": []}");
}

#[tokio::test]
async fn test_status_codes_map_to_failures() {
    let cases = [
        (401, ApiFailure::AuthenticationFailed),
        (429, ApiFailure::RateLimitExceeded),
        (503, ApiFailure::ServiceUnavailable),
    ];

    for (status, expected) in cases {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;

        let result = generator_for(&server).synthesize("prompt").await;
        assert_eq!(result, Err(expected), "status {status}");
    }
}

#[tokio::test]
async fn test_server_error_keeps_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model overloaded"))
        .mount(&server)
        .await;

    match generator_for(&server).synthesize("prompt").await {
        Err(ApiFailure::ServerError(detail)) => assert!(detail.contains("model overloaded")),
        other => panic!("expected server error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_candidate_is_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
        .mount(&server)
        .await;

    let result = generator_for(&server).synthesize("prompt").await;
    assert_eq!(result, Err(ApiFailure::EmptyResponse));
}

#[tokio::test]
async fn test_slow_provider_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let mut config = GeneratorConfig::new("gen-key", "img-key")
        .unwrap()
        .with_generator_endpoint(&server.uri())
        .unwrap();
    config.http_timeout = Duration::from_millis(100);
    let generator = RealContentGenerator::new(config).unwrap();

    assert_eq!(generator.synthesize("prompt").await, Err(ApiFailure::Timeout));
}

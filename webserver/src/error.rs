//! WebServer-specific error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::{json, Map, Value};
use thiserror::Error;

use generator::GeneratorError;
use shared::{ArticleRecord, SharedError};

#[derive(Error, Debug)]
pub enum WebServerError {
    #[error("Missing {header} header")]
    MissingStoreHeader { header: &'static str },

    #[error("Invalid {header} header")]
    InvalidStoreHeader { header: &'static str },

    #[error("Invalid request body: {details}")]
    InvalidBody { details: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] SharedError),

    #[error(transparent)]
    Generation(#[from] GeneratorError),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Server startup error: {0}")]
    ServerStartup(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type WebServerResult<T> = Result<T, WebServerError>;

impl WebServerError {
    pub fn config(message: impl Into<String>) -> Self {
        WebServerError::Config { message: message.into() }
    }

    /// HTTP status for this failure
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebServerError::MissingStoreHeader { .. }
            | WebServerError::InvalidStoreHeader { .. }
            | WebServerError::InvalidBody { .. }
            | WebServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            WebServerError::Generation(error) => match error {
                GeneratorError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
                GeneratorError::InsufficientQuota { .. } => StatusCode::PAYMENT_REQUIRED,
                GeneratorError::GenerationProvider(_) => StatusCode::BAD_GATEWAY,
                GeneratorError::Timeout => StatusCode::GATEWAY_TIMEOUT,
                GeneratorError::QuotaNotFinalized { .. } => StatusCode::CONFLICT,
                GeneratorError::Persistence { .. } | GeneratorError::Store(_) | GeneratorError::Config { .. } => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            WebServerError::Config { .. } | WebServerError::ServerStartup(_) | WebServerError::IoError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Stable label for the failure kind
    pub fn kind(&self) -> &'static str {
        match self {
            WebServerError::MissingStoreHeader { .. } | WebServerError::InvalidStoreHeader { .. } => {
                "missing_store_identity"
            }
            WebServerError::InvalidBody { .. } | WebServerError::InvalidRequest(_) => "invalid_request",
            WebServerError::Generation(error) => error.kind(),
            WebServerError::Config { .. } => "config_error",
            WebServerError::ServerStartup(_) | WebServerError::IoError(_) => "internal_error",
        }
    }

    /// Error body: `{"error": {"kind", "message", ...details}}`
    pub fn to_body(&self) -> Value {
        let mut body = Map::new();
        body.insert("kind".to_string(), json!(self.kind()));
        body.insert("message".to_string(), json!(self.to_string()));

        if let WebServerError::Generation(error) = self {
            match error {
                GeneratorError::InsufficientQuota { requested, available, deficit } => {
                    body.insert("requested".to_string(), json!(requested));
                    body.insert("available".to_string(), json!(available));
                    body.insert("deficit".to_string(), json!(deficit));
                }
                GeneratorError::Persistence { failed_index, persisted, tokens_remaining, .. } => {
                    body.insert("failed_index".to_string(), json!(failed_index));
                    body.insert("persisted_ids".to_string(), persisted_ids(persisted));
                    body.insert("remaining_tokens".to_string(), json!(tokens_remaining));
                }
                GeneratorError::QuotaNotFinalized { requested, available, persisted, .. } => {
                    body.insert("requested".to_string(), json!(requested));
                    body.insert("available".to_string(), json!(available));
                    body.insert("persisted_ids".to_string(), persisted_ids(persisted));
                }
                _ => {}
            }
        }

        json!({ "error": body })
    }
}

fn persisted_ids(records: &[ArticleRecord]) -> Value {
    records.iter().map(|r| json!(r.id)).collect()
}

impl IntoResponse for WebServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(kind = self.kind(), error = %self, "Request failed");
        } else {
            tracing::debug!(kind = self.kind(), error = %self, "Request rejected");
        }
        (status, Json(self.to_body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ApiFailure;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (GeneratorError::InsufficientQuota { requested: 3, available: 2, deficit: 1 }, StatusCode::PAYMENT_REQUIRED),
            (GeneratorError::GenerationProvider(ApiFailure::ServiceUnavailable), StatusCode::BAD_GATEWAY),
            (GeneratorError::Timeout, StatusCode::GATEWAY_TIMEOUT),
            (
                GeneratorError::QuotaNotFinalized {
                    requested: 2,
                    available: Some(1),
                    reason: "race".to_string(),
                    persisted: Vec::new(),
                },
                StatusCode::CONFLICT,
            ),
        ];
        for (error, status) in cases {
            assert_eq!(WebServerError::from(error).status_code(), status);
        }
        assert_eq!(
            WebServerError::MissingStoreHeader { header: "X-Shop-Domain" }.status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_insufficient_quota_body_carries_deficit() {
        let error = WebServerError::from(GeneratorError::InsufficientQuota { requested: 3, available: 2, deficit: 1 });
        let body = error.to_body();
        assert_eq!(body["error"]["kind"], "insufficient_quota");
        assert_eq!(body["error"]["deficit"], 1);
        assert_eq!(body["error"]["available"], 2);
    }
}

//! Generator error types

use thiserror::Error;
use uuid::Uuid;

use shared::{ApiFailure, ArticleRecord, PostStatus, SharedError};

/// Result type for generator operations
pub type GeneratorResult<T> = Result<T, GeneratorError>;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Failures raised by quota and article stores
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Article not found: {id}")]
    ArticleNotFound { id: Uuid },

    #[error("Invalid status transition for article {id}: {from} -> {to}")]
    InvalidTransition { id: Uuid, from: PostStatus, to: PostStatus },

    #[error("Corrupt record: {message}")]
    CorruptRecord { message: String },

    #[error("Storage unavailable: {message}")]
    Unavailable { message: String },

    #[error("Task join error: {0}")]
    JoinError(#[from] tokio::task::JoinError),
}

/// Failures of a generation request; every variant leaves the stores in a valid state
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] SharedError),

    #[error("Insufficient tokens: requested {requested}, available {available} (short by {deficit})")]
    InsufficientQuota { requested: u32, available: u32, deficit: u32 },

    #[error("Content generation failed: {0}")]
    GenerationProvider(ApiFailure),

    #[error("Generation deadline exceeded before content was produced")]
    Timeout,

    /// `tokens_remaining` is `None` when no deduction was made
    #[error("Failed to save post at index {failed_index}: {message}")]
    Persistence {
        message: String,
        failed_index: usize,
        persisted: Vec<ArticleRecord>,
        tokens_remaining: Option<u32>,
    },

    /// Posts were saved but the guarded deduction did not apply
    #[error("Quota could not be finalized for {requested} tokens: {reason}")]
    QuotaNotFinalized {
        requested: u32,
        available: Option<u32>,
        reason: String,
        persisted: Vec<ArticleRecord>,
    },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl GeneratorError {
    /// Stable label for the failure kind, used by transport layers
    pub fn kind(&self) -> &'static str {
        match self {
            GeneratorError::InvalidRequest(_) => "invalid_request",
            GeneratorError::InsufficientQuota { .. } => "insufficient_quota",
            GeneratorError::GenerationProvider(_) => "generation_provider_error",
            GeneratorError::Timeout => "timeout",
            GeneratorError::Persistence { .. } => "persistence_error",
            GeneratorError::QuotaNotFinalized { .. } => "quota_not_finalized",
            GeneratorError::Store(_) => "store_error",
            GeneratorError::Config { .. } => "config_error",
        }
    }

    /// Records that were saved before the failure, if any
    pub fn persisted(&self) -> &[ArticleRecord] {
        match self {
            GeneratorError::Persistence { persisted, .. }
            | GeneratorError::QuotaNotFinalized { persisted, .. } => persisted,
            _ => &[],
        }
    }
}

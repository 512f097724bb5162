//! Shared error types for the blog generation system

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SharedError {
    #[error("Invalid store id: {input:?}")]
    InvalidStoreId { input: String },

    #[error("Unknown {kind}: {value}")]
    UnknownVariant { kind: &'static str, value: String },

    #[error("Invalid request: {field} {reason}")]
    InvalidRequest { field: String, reason: String },
}

pub type SharedResult<T> = Result<T, SharedError>;

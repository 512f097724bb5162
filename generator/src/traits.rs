//! Generator trait definitions for dependency injection

use async_trait::async_trait;
use uuid::Uuid;

use shared::{ApiFailure, ArticleRecord, NewArticle, PostStatus, StoreAccount, StoreId};
use crate::error::StoreResult;
use crate::types::DeductOutcome;

/// External text generation provider
#[mockall::automock]
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Send one prompt and return the raw generated text (single attempt)
    async fn synthesize(&self, prompt: &str) -> Result<String, ApiFailure>;
}

/// External image search provider
#[mockall::automock]
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Find at most one image for a short description; failures resolve to `None`
    async fn find_image(&self, hint: &str) -> Option<String>;
}

/// Per-store token balance storage
#[mockall::automock]
#[async_trait]
pub trait QuotaStore: Send + Sync {
    /// Read an account, creating the default free-tier account on first reference
    async fn load_account(&self, store_id: &StoreId) -> StoreResult<StoreAccount>;

    /// Insert or replace an account (provisioning and billing)
    async fn put_account(&self, account: StoreAccount) -> StoreResult<()>;

    /// Decrement by `amount` only if the balance covers it, as one atomic step
    async fn try_deduct(&self, store_id: &StoreId, amount: u32) -> StoreResult<DeductOutcome>;
}

/// Generated article storage
#[mockall::automock]
#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Append a new article with status `generated` and write-time timestamps
    async fn create_article(&self, article: NewArticle) -> StoreResult<ArticleRecord>;

    /// List a store's articles, newest first
    async fn list_articles(&self, store_id: &StoreId) -> StoreResult<Vec<ArticleRecord>>;

    /// Move one of the store's articles forward in its lifecycle
    async fn update_status(&self, store_id: &StoreId, id: Uuid, status: PostStatus) -> StoreResult<ArticleRecord>;
}

//! WebServer trait definitions for dependency injection

use async_trait::async_trait;

use generator::{GenerationOutcome, GeneratorResult, UsageSummary};
use shared::{ArticleRecord, GenerationRequest, StoreAccount, StoreId};

/// Blog generation operations exposed over HTTP
#[mockall::automock]
#[async_trait]
pub trait BlogService: Send + Sync {
    /// Run one metered generation request for a store
    async fn generate(&self, request: GenerationRequest, store_id: StoreId) -> GeneratorResult<GenerationOutcome>;

    /// Current balance and plan
    async fn account(&self, store_id: StoreId) -> GeneratorResult<StoreAccount>;

    /// Newest articles first, at most `limit`
    async fn articles(&self, store_id: StoreId, limit: usize) -> GeneratorResult<Vec<ArticleRecord>>;

    /// Token usage and post counts
    async fn analytics(&self, store_id: StoreId) -> GeneratorResult<UsageSummary>;
}

//! BlogService backed by the generation orchestrator

use async_trait::async_trait;

use generator::{
    ArticleStore, ContentGenerator, GenerationOrchestrator, GenerationOutcome, GeneratorResult, ImageSource,
    QuotaStore, UsageSummary,
};
use shared::{ArticleRecord, GenerationRequest, StoreAccount, StoreId};

use crate::traits::BlogService;

#[async_trait]
impl<G, I, Q, A> BlogService for GenerationOrchestrator<G, I, Q, A>
where
    G: ContentGenerator,
    I: ImageSource,
    Q: QuotaStore,
    A: ArticleStore,
{
    async fn generate(&self, request: GenerationRequest, store_id: StoreId) -> GeneratorResult<GenerationOutcome> {
        GenerationOrchestrator::generate(self, &request, &store_id).await
    }

    async fn account(&self, store_id: StoreId) -> GeneratorResult<StoreAccount> {
        GenerationOrchestrator::account(self, &store_id).await
    }

    async fn articles(&self, store_id: StoreId, limit: usize) -> GeneratorResult<Vec<ArticleRecord>> {
        self.recent_articles(&store_id, limit).await
    }

    async fn analytics(&self, store_id: StoreId) -> GeneratorResult<UsageSummary> {
        self.usage_summary(&store_id).await
    }
}

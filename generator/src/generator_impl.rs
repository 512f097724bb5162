//! Generation orchestrator with dependency injection
//!
//! One call runs the whole metered workflow for a store:
//! admission check, one batched generator call, response interpretation,
//! concurrent image enrichment, per-post persistence and finally the
//! guarded quota deduction. The orchestrator keeps no state between calls.

use std::time::Duration;

use futures_util::future::join_all;
use tokio::time::{timeout_at, Instant};
use uuid::Uuid;

use shared::{
    store_debug, store_error, store_info, store_warn, ArticleRecord, GenerationRequest, NewArticle, PostDraft,
    PostStatus, StoreAccount, StoreId,
};
use crate::core::{interpret, PromptSpec, UsageSummary};
use crate::error::{GeneratorError, GeneratorResult, StoreError};
use crate::traits::{ArticleStore, ContentGenerator, ImageSource, QuotaStore};
use crate::types::{DeductOutcome, GenerationOutcome};

/// Default bound for one whole generation request
pub const DEFAULT_REQUEST_DEADLINE: Duration = Duration::from_secs(120);

/// Token-metered generation workflow
pub struct GenerationOrchestrator<G, I, Q, A>
where
    G: ContentGenerator,
    I: ImageSource,
    Q: QuotaStore,
    A: ArticleStore,
{
    pub content_generator: G,
    pub image_source: I,
    pub quota_store: Q,
    pub article_store: A,
    request_deadline: Duration,
}

impl<G, I, Q, A> GenerationOrchestrator<G, I, Q, A>
where
    G: ContentGenerator,
    I: ImageSource,
    Q: QuotaStore,
    A: ArticleStore,
{
    /// Create new orchestrator instance
    pub fn new(content_generator: G, image_source: I, quota_store: Q, article_store: A) -> Self {
        Self {
            content_generator,
            image_source,
            quota_store,
            article_store,
            request_deadline: DEFAULT_REQUEST_DEADLINE,
        }
    }

    pub fn with_request_deadline(mut self, deadline: Duration) -> Self {
        self.request_deadline = deadline;
        self
    }

    /// Run one generation request bounded by the configured deadline
    pub async fn generate(
        &self,
        request: &GenerationRequest,
        store_id: &StoreId,
    ) -> GeneratorResult<GenerationOutcome> {
        let deadline = Instant::now() + self.request_deadline;
        self.generate_with_deadline(request, store_id, deadline).await
    }

    /// Run one generation request that must produce content before `deadline`
    pub async fn generate_with_deadline(
        &self,
        request: &GenerationRequest,
        store_id: &StoreId,
        deadline: Instant,
    ) -> GeneratorResult<GenerationOutcome> {
        request.validate()?;
        let requested = request.post_count;

        // Admission: nothing external happens unless the balance covers the request
        let account = self.quota_store.load_account(store_id).await?;
        if account.tokens_remaining < requested {
            store_warn!(
                store_id,
                requested,
                available = account.tokens_remaining,
                "Rejected generation: insufficient tokens"
            );
            return Err(GeneratorError::InsufficientQuota {
                requested,
                available: account.tokens_remaining,
                deficit: requested - account.tokens_remaining,
            });
        }

        // One generator call for the whole batch
        let prompt = PromptSpec::from_request(request).render();
        store_debug!(store_id, requested, prompt_chars = prompt.len(), "Requesting content");
        let raw = match timeout_at(deadline, self.content_generator.synthesize(&prompt)).await {
            Ok(Ok(raw)) => raw,
            Ok(Err(failure)) => {
                store_error!(store_id, failure = %failure, "Content generation failed");
                return Err(GeneratorError::GenerationProvider(failure));
            }
            Err(_) => {
                store_error!(store_id, "Content generation exceeded the request deadline");
                return Err(GeneratorError::Timeout);
            }
        };

        let interpretation = interpret(&raw);
        let used_fallback = !interpretation.is_structured();
        if used_fallback {
            store_warn!(store_id, "Generator output was not structured, using single-post fallback");
        }
        let mut drafts = interpretation.into_drafts(request.topic.trim());
        if drafts.len() > requested as usize {
            store_warn!(
                store_id,
                requested,
                returned = drafts.len(),
                "Generator returned more posts than requested, keeping the first ones"
            );
            drafts.truncate(requested as usize);
        }

        let images = self.find_images(store_id, &drafts, deadline).await;
        let (persisted, failure) = self.persist(store_id, drafts, images).await;

        if persisted.is_empty() {
            // nothing was delivered, so nothing is charged
            let (failed_index, error) = failure.unwrap_or_else(|| {
                (0, StoreError::Unavailable { message: "no posts were produced".to_string() })
            });
            return Err(GeneratorError::Persistence {
                message: error.to_string(),
                failed_index,
                persisted,
                tokens_remaining: None,
            });
        }

        // Deduct the requested count, guarded against concurrent spends
        let deduction = self.quota_store.try_deduct(store_id, requested).await;

        match (deduction, failure) {
            (Ok(DeductOutcome::Applied { tokens_remaining }), None) => {
                store_info!(
                    store_id,
                    posts = persisted.len(),
                    tokens_used = requested,
                    tokens_remaining,
                    "✅ Generated posts"
                );
                Ok(GenerationOutcome {
                    posts: persisted,
                    tokens_used: requested,
                    tokens_remaining,
                    used_fallback,
                })
            }
            (Ok(DeductOutcome::Applied { tokens_remaining }), Some((failed_index, error))) => {
                Err(GeneratorError::Persistence {
                    message: error.to_string(),
                    failed_index,
                    persisted,
                    tokens_remaining: Some(tokens_remaining),
                })
            }
            (Ok(DeductOutcome::Rejected { tokens_remaining }), failure) => {
                store_error!(
                    store_id,
                    requested,
                    available = tokens_remaining,
                    saved = persisted.len(),
                    "Quota deduction rejected after posts were saved"
                );
                match failure {
                    Some((failed_index, error)) => Err(GeneratorError::Persistence {
                        message: error.to_string(),
                        failed_index,
                        persisted,
                        tokens_remaining: None,
                    }),
                    None => Err(GeneratorError::QuotaNotFinalized {
                        requested,
                        available: Some(tokens_remaining),
                        reason: "balance changed by a concurrent request".to_string(),
                        persisted,
                    }),
                }
            }
            (Err(error), _) => {
                store_error!(store_id, error = %error, saved = persisted.len(), "Quota deduction failed");
                Err(GeneratorError::QuotaNotFinalized {
                    requested,
                    available: None,
                    reason: error.to_string(),
                    persisted,
                })
            }
        }
    }

    /// Look up one image per post concurrently; misses and timeouts become `None`
    async fn find_images(&self, store_id: &StoreId, drafts: &[PostDraft], deadline: Instant) -> Vec<Option<String>> {
        let lookups = drafts.iter().map(|draft| async move {
            match timeout_at(deadline, self.image_source.find_image(&draft.image_description)).await {
                Ok(image) => image,
                Err(_) => {
                    store_warn!(store_id, hint = %draft.image_description, "Image lookup hit the deadline");
                    None
                }
            }
        });
        join_all(lookups).await
    }

    /// Save posts in order, stopping at the first failure
    async fn persist(
        &self,
        store_id: &StoreId,
        drafts: Vec<PostDraft>,
        images: Vec<Option<String>>,
    ) -> (Vec<ArticleRecord>, Option<(usize, StoreError)>) {
        let mut persisted = Vec::with_capacity(drafts.len());

        for (index, (draft, image_url)) in drafts.into_iter().zip(images).enumerate() {
            let article = NewArticle::from_draft(store_id.clone(), draft, image_url);
            match self.article_store.create_article(article).await {
                Ok(record) => persisted.push(record),
                Err(error) => {
                    store_error!(store_id, index, error = %error, "Failed to save generated post");
                    return (persisted, Some((index, error)));
                }
            }
        }
        (persisted, None)
    }

    /// Current balance and plan, creating the default account on first reference
    pub async fn account(&self, store_id: &StoreId) -> GeneratorResult<StoreAccount> {
        Ok(self.quota_store.load_account(store_id).await?)
    }

    /// Newest articles first, at most `limit`
    pub async fn recent_articles(&self, store_id: &StoreId, limit: usize) -> GeneratorResult<Vec<ArticleRecord>> {
        let mut articles = self.article_store.list_articles(store_id).await?;
        articles.truncate(limit);
        Ok(articles)
    }

    /// Token usage and post counts for a store
    pub async fn usage_summary(&self, store_id: &StoreId) -> GeneratorResult<UsageSummary> {
        let account = self.quota_store.load_account(store_id).await?;
        let articles = self.article_store.list_articles(store_id).await?;
        Ok(UsageSummary::compute(&account, &articles))
    }

    /// Move an article forward (draft or published) for downstream publishing
    pub async fn update_article_status(
        &self,
        store_id: &StoreId,
        id: Uuid,
        status: PostStatus,
    ) -> GeneratorResult<ArticleRecord> {
        Ok(self.article_store.update_status(store_id, id, status).await?)
    }
}

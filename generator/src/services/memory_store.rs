//! In-memory quota and article store

use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use shared::{ArticleRecord, NewArticle, PostStatus, StoreAccount, StoreId};
use crate::error::{StoreError, StoreResult};
use crate::traits::{ArticleStore, QuotaStore};
use crate::types::DeductOutcome;

/// Process-local store; clones share the same data
#[derive(Clone, Default)]
pub struct InMemoryStore {
    accounts: Arc<RwLock<HashMap<StoreId, StoreAccount>>>,
    articles: Arc<RwLock<Vec<ArticleRecord>>>,
}

impl InMemoryStore {
    /// Create new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with accounts
    pub fn with_accounts(accounts: impl IntoIterator<Item = StoreAccount>) -> Self {
        let accounts = accounts
            .into_iter()
            .map(|account| (account.store_id.clone(), account))
            .collect();
        Self {
            accounts: Arc::new(RwLock::new(accounts)),
            articles: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Number of articles across all stores
    pub async fn article_count(&self) -> usize {
        self.articles.read().await.len()
    }
}

#[async_trait]
impl QuotaStore for InMemoryStore {
    async fn load_account(&self, store_id: &StoreId) -> StoreResult<StoreAccount> {
        if let Some(account) = self.accounts.read().await.get(store_id) {
            return Ok(account.clone());
        }
        let mut accounts = self.accounts.write().await;
        let account = accounts
            .entry(store_id.clone())
            .or_insert_with(|| StoreAccount::with_defaults(store_id.clone()));
        Ok(account.clone())
    }

    async fn put_account(&self, account: StoreAccount) -> StoreResult<()> {
        let mut accounts = self.accounts.write().await;
        accounts.insert(account.store_id.clone(), account);
        Ok(())
    }

    async fn try_deduct(&self, store_id: &StoreId, amount: u32) -> StoreResult<DeductOutcome> {
        // check and decrement under one write guard
        let mut accounts = self.accounts.write().await;
        let account = accounts
            .entry(store_id.clone())
            .or_insert_with(|| StoreAccount::with_defaults(store_id.clone()));

        if account.tokens_remaining < amount {
            return Ok(DeductOutcome::Rejected { tokens_remaining: account.tokens_remaining });
        }
        account.tokens_remaining -= amount;
        Ok(DeductOutcome::Applied { tokens_remaining: account.tokens_remaining })
    }
}

#[async_trait]
impl ArticleStore for InMemoryStore {
    async fn create_article(&self, article: NewArticle) -> StoreResult<ArticleRecord> {
        let record = ArticleRecord::create(article, Utc::now());
        self.articles.write().await.push(record.clone());
        Ok(record)
    }

    async fn list_articles(&self, store_id: &StoreId) -> StoreResult<Vec<ArticleRecord>> {
        let articles = self.articles.read().await;
        // insertion order is creation order
        Ok(articles
            .iter()
            .rev()
            .filter(|record| &record.store_id == store_id)
            .cloned()
            .collect())
    }

    async fn update_status(&self, store_id: &StoreId, id: Uuid, status: PostStatus) -> StoreResult<ArticleRecord> {
        let mut articles = self.articles.write().await;
        let record = articles
            .iter_mut()
            .find(|record| record.id == id && &record.store_id == store_id)
            .ok_or(StoreError::ArticleNotFound { id })?;

        if !record.status.can_transition_to(status) {
            return Err(StoreError::InvalidTransition { id, from: record.status, to: status });
        }
        record.status = status;
        record.updated_at = Utc::now();
        Ok(record.clone())
    }
}

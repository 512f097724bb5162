//! Per-store usage analytics

use serde::{Deserialize, Serialize};

use shared::{ArticleRecord, PostStatus, StoreAccount, SubscriptionPlan};

/// Token and post counts for a store's dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageSummary {
    pub subscription_plan: SubscriptionPlan,
    pub total_posts: usize,
    pub published_posts: usize,
    pub draft_posts: usize,
    pub generated_posts: usize,
    pub tokens_remaining: u32,
    pub tokens_used: u32,
    pub token_limit: u32,
    /// Share of the plan allowance consumed, 0.0 to 100.0
    pub usage_percentage: f64,
}

impl UsageSummary {
    pub fn compute(account: &StoreAccount, articles: &[ArticleRecord]) -> Self {
        let count = |status: PostStatus| articles.iter().filter(|a| a.status == status).count();

        let token_limit = account.token_limit();
        let tokens_used = token_limit.saturating_sub(account.tokens_remaining);
        let usage_percentage = if token_limit == 0 {
            0.0
        } else {
            (f64::from(tokens_used) / f64::from(token_limit) * 100.0).clamp(0.0, 100.0)
        };

        Self {
            subscription_plan: account.subscription_plan,
            total_posts: articles.len(),
            published_posts: count(PostStatus::Published),
            draft_posts: count(PostStatus::Draft),
            generated_posts: count(PostStatus::Generated),
            tokens_remaining: account.tokens_remaining,
            tokens_used,
            token_limit,
            usage_percentage,
        }
    }
}

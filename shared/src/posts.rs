//! Generated post and persisted article types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::errors::SharedError;
use crate::types::StoreId;

/// One post in the structured shape requested from the generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDraft {
    pub title: String,
    #[serde(default)]
    pub meta_description: String,
    pub content: String,
    #[serde(default)]
    pub image_description: String,
}

/// Lifecycle of a persisted article
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Generated,
    Draft,
    Published,
}

impl PostStatus {
    fn rank(self) -> u8 {
        match self {
            PostStatus::Generated => 0,
            PostStatus::Draft => 1,
            PostStatus::Published => 2,
        }
    }

    /// Status only ever moves forward
    pub fn can_transition_to(self, next: PostStatus) -> bool {
        next.rank() > self.rank()
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostStatus::Generated => write!(f, "generated"),
            PostStatus::Draft => write!(f, "draft"),
            PostStatus::Published => write!(f, "published"),
        }
    }
}

impl FromStr for PostStatus {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "generated" => Ok(PostStatus::Generated),
            "draft" => Ok(PostStatus::Draft),
            "published" => Ok(PostStatus::Published),
            _ => Err(SharedError::UnknownVariant { kind: "status", value: s.to_string() }),
        }
    }
}

/// Enriched post ready to be written to the article store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewArticle {
    pub store_id: StoreId,
    pub title: String,
    pub meta_description: String,
    pub content: String,
    pub image_url: Option<String>,
}

impl NewArticle {
    pub fn from_draft(store_id: StoreId, draft: PostDraft, image_url: Option<String>) -> Self {
        Self {
            store_id,
            title: draft.title,
            meta_description: draft.meta_description,
            content: draft.content,
            image_url,
        }
    }
}

/// Persisted article owned by a store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub id: Uuid,
    pub store_id: StoreId,
    pub title: String,
    pub meta_description: String,
    pub content: String,
    pub image_url: Option<String>,
    pub status: PostStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ArticleRecord {
    /// Materialize a new article with a fresh id and write-time timestamps
    pub fn create(article: NewArticle, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            store_id: article.store_id,
            title: article.title,
            meta_description: article.meta_description,
            content: article.content,
            image_url: article.image_url,
            status: PostStatus::Generated,
            created_at: now,
            updated_at: now,
        }
    }
}

//! Core types used throughout the blog generation system

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{SharedError, SharedResult};

/// Maximum number of posts a single generation request may ask for
pub const MAX_POSTS_PER_REQUEST: u32 = 10;

/// Maximum number of keywords accepted in a generation request
pub const MAX_KEYWORDS: usize = 100;

/// Language used when the request does not name one
pub const DEFAULT_LANGUAGE: &str = "English";

/// Stable identifier of a storefront (its shop domain)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoreId(String);

impl StoreId {
    /// Create a store identifier, rejecting blank input
    pub fn new(id: impl Into<String>) -> SharedResult<Self> {
        let id = id.into().trim().to_string();
        if id.is_empty() {
            return Err(SharedError::InvalidStoreId { input: id });
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for StoreId {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StoreId::new(s)
    }
}

/// Subscription tiers offered to storefronts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionPlan {
    #[default]
    Free,
    Creator,
    Business,
    Enterprise,
}

impl SubscriptionPlan {
    /// Token ceiling granted by the plan
    pub const fn token_limit(self) -> u32 {
        match self {
            SubscriptionPlan::Free => 7,
            SubscriptionPlan::Creator => 25,
            SubscriptionPlan::Business => 100,
            SubscriptionPlan::Enterprise => 1000,
        }
    }

    /// Resolve a stored plan label, falling back to the free tier for unknown labels
    pub fn from_label_or_free(label: &str) -> Self {
        label.parse().unwrap_or_default()
    }
}

impl fmt::Display for SubscriptionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubscriptionPlan::Free => write!(f, "free"),
            SubscriptionPlan::Creator => write!(f, "creator"),
            SubscriptionPlan::Business => write!(f, "business"),
            SubscriptionPlan::Enterprise => write!(f, "enterprise"),
        }
    }
}

impl FromStr for SubscriptionPlan {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "free" => Ok(SubscriptionPlan::Free),
            "creator" => Ok(SubscriptionPlan::Creator),
            "business" => Ok(SubscriptionPlan::Business),
            "enterprise" => Ok(SubscriptionPlan::Enterprise),
            _ => Err(SharedError::UnknownVariant { kind: "plan", value: s.to_string() }),
        }
    }
}

/// Per-store quota record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreAccount {
    pub store_id: StoreId,
    pub tokens_remaining: u32,
    pub subscription_plan: SubscriptionPlan,
}

impl StoreAccount {
    /// Account created implicitly the first time a store is referenced
    pub fn with_defaults(store_id: StoreId) -> Self {
        let plan = SubscriptionPlan::default();
        Self {
            store_id,
            tokens_remaining: plan.token_limit(),
            subscription_plan: plan,
        }
    }

    pub fn new(store_id: StoreId, tokens_remaining: u32, subscription_plan: SubscriptionPlan) -> Self {
        Self { store_id, tokens_remaining, subscription_plan }
    }

    pub fn token_limit(&self) -> u32 {
        self.subscription_plan.token_limit()
    }
}

/// Writing style requested for generated posts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Professional,
    Casual,
    Persuasive,
    Fun,
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tone::Professional => write!(f, "professional"),
            Tone::Casual => write!(f, "casual"),
            Tone::Persuasive => write!(f, "persuasive"),
            Tone::Fun => write!(f, "fun"),
        }
    }
}

impl FromStr for Tone {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "professional" => Ok(Tone::Professional),
            "casual" => Ok(Tone::Casual),
            "persuasive" => Ok(Tone::Persuasive),
            "fun" => Ok(Tone::Fun),
            _ => Err(SharedError::UnknownVariant { kind: "tone", value: s.to_string() }),
        }
    }
}

/// Length class of a post, each mapping to an approximate word count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthClass {
    Short,
    #[default]
    Medium,
    Long,
}

impl LengthClass {
    pub const fn target_words(self) -> u32 {
        match self {
            LengthClass::Short => 500,
            LengthClass::Medium => 1000,
            LengthClass::Long => 2000,
        }
    }
}

impl fmt::Display for LengthClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LengthClass::Short => write!(f, "short"),
            LengthClass::Medium => write!(f, "medium"),
            LengthClass::Long => write!(f, "long"),
        }
    }
}

impl FromStr for LengthClass {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "short" => Ok(LengthClass::Short),
            "medium" => Ok(LengthClass::Medium),
            "long" => Ok(LengthClass::Long),
            _ => Err(SharedError::UnknownVariant { kind: "length", value: s.to_string() }),
        }
    }
}

/// Ephemeral request for a batch of generated posts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub topic: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub tone: Tone,
    #[serde(default)]
    pub audience: String,
    #[serde(default)]
    pub length: LengthClass,
    pub post_count: u32,
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

impl GenerationRequest {
    /// Request with default tone, length and language
    pub fn new(topic: impl Into<String>, post_count: u32) -> Self {
        Self {
            topic: topic.into(),
            keywords: Vec::new(),
            tone: Tone::default(),
            audience: String::new(),
            length: LengthClass::default(),
            post_count,
            language: default_language(),
        }
    }

    /// Check the request shape; quota is checked separately
    pub fn validate(&self) -> SharedResult<()> {
        if self.topic.trim().is_empty() {
            return Err(SharedError::InvalidRequest {
                field: "topic".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.post_count == 0 || self.post_count > MAX_POSTS_PER_REQUEST {
            return Err(SharedError::InvalidRequest {
                field: "post_count".to_string(),
                reason: format!("must be between 1 and {MAX_POSTS_PER_REQUEST}, got {}", self.post_count),
            });
        }
        if self.keywords.len() > MAX_KEYWORDS {
            return Err(SharedError::InvalidRequest {
                field: "keywords".to_string(),
                reason: format!("at most {MAX_KEYWORDS} keywords allowed, got {}", self.keywords.len()),
            });
        }
        Ok(())
    }

    /// Split a comma separated keyword field, keeping order
    pub fn parse_keywords(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Failure modes of an external provider call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiFailure {
    NetworkError(String),
    Timeout,
    AuthenticationFailed,
    RateLimitExceeded,
    ServiceUnavailable,
    ServerError(String),
    InvalidResponse(String),
    EmptyResponse,
}

impl ApiFailure {
    /// Map a non-success HTTP status to a failure
    pub fn from_status(status: u16, detail: impl Into<String>) -> Self {
        match status {
            401 | 403 => ApiFailure::AuthenticationFailed,
            429 => ApiFailure::RateLimitExceeded,
            503 => ApiFailure::ServiceUnavailable,
            _ => ApiFailure::ServerError(format!("HTTP {status}: {}", detail.into())),
        }
    }
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiFailure::NetworkError(msg) => write!(f, "network error: {msg}"),
            ApiFailure::Timeout => write!(f, "request timed out"),
            ApiFailure::AuthenticationFailed => write!(f, "authentication failed"),
            ApiFailure::RateLimitExceeded => write!(f, "rate limit exceeded"),
            ApiFailure::ServiceUnavailable => write!(f, "service unavailable"),
            ApiFailure::ServerError(msg) => write!(f, "server error: {msg}"),
            ApiFailure::InvalidResponse(msg) => write!(f, "invalid response: {msg}"),
            ApiFailure::EmptyResponse => write!(f, "empty response"),
        }
    }
}

//! Request and response shapes of the HTTP API

use serde::{Deserialize, Serialize};

use generator::GenerationOutcome;
use shared::{
    ArticleRecord, GenerationRequest, LengthClass, SharedResult, StoreAccount, StoreId, SubscriptionPlan, Tone,
    DEFAULT_LANGUAGE,
};

/// Header carrying the authenticated store identity
pub const SHOP_DOMAIN_HEADER: &str = "X-Shop-Domain";

/// Article listing size when no limit is given
pub const DEFAULT_ARTICLE_LIMIT: usize = 10;

/// Generation form as submitted by the admin UI
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateForm {
    #[serde(alias = "mainTopic")]
    pub main_topic: String,
    /// Comma separated keyword list
    #[serde(default)]
    pub keywords: String,
    #[serde(default)]
    pub tone: Option<String>,
    #[serde(default)]
    pub audience: String,
    #[serde(default)]
    pub length: Option<String>,
    #[serde(alias = "numberOfPosts")]
    pub number_of_posts: u32,
    #[serde(default)]
    pub language: Option<String>,
}

impl GenerateForm {
    /// Convert into a generation request; unknown tone or length labels are rejected
    pub fn into_request(self) -> SharedResult<GenerationRequest> {
        let tone = match self.tone.as_deref().map(str::trim) {
            None | Some("") => Tone::default(),
            Some(label) => label.parse()?,
        };
        let length = match self.length.as_deref().map(str::trim) {
            None | Some("") => LengthClass::default(),
            Some(label) => label.parse()?,
        };
        let language = self
            .language
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());

        Ok(GenerationRequest {
            topic: self.main_topic.trim().to_string(),
            keywords: GenerationRequest::parse_keywords(&self.keywords),
            tone,
            audience: self.audience.trim().to_string(),
            length,
            post_count: self.number_of_posts,
            language,
        })
    }
}

/// Successful generation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub success: bool,
    pub posts: Vec<ArticleRecord>,
    pub tokens_used: u32,
    pub remaining_tokens: u32,
    pub used_fallback: bool,
}

impl From<GenerationOutcome> for GenerateResponse {
    fn from(outcome: GenerationOutcome) -> Self {
        Self {
            success: true,
            posts: outcome.posts,
            tokens_used: outcome.tokens_used,
            remaining_tokens: outcome.tokens_remaining,
            used_fallback: outcome.used_fallback,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    pub store_id: StoreId,
    pub tokens_remaining: u32,
    pub subscription_plan: SubscriptionPlan,
    pub token_limit: u32,
}

impl From<StoreAccount> for AccountResponse {
    fn from(account: StoreAccount) -> Self {
        let token_limit = account.token_limit();
        Self {
            store_id: account.store_id,
            tokens_remaining: account.tokens_remaining,
            subscription_plan: account.subscription_plan,
            token_limit,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticlesQuery {
    pub limit: Option<usize>,
}

impl ArticlesQuery {
    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_ARTICLE_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_form_defaults() {
        let form: GenerateForm = serde_json::from_value(json!({
            "main_topic": "  Cold Brew  ",
            "number_of_posts": 2
        }))
        .unwrap();

        let request = form.into_request().unwrap();
        assert_eq!(request.topic, "Cold Brew");
        assert_eq!(request.tone, Tone::Professional);
        assert_eq!(request.length, LengthClass::Medium);
        assert_eq!(request.language, "English");
        assert!(request.keywords.is_empty());
    }

    #[test]
    fn test_form_accepts_camel_case_fields() {
        let form: GenerateForm = serde_json::from_value(json!({
            "mainTopic": "Cold Brew",
            "numberOfPosts": 3,
            "keywords": "coffee, summer ,, iced",
            "tone": "Casual",
            "length": "long",
            "language": "Spanish"
        }))
        .unwrap();

        let request = form.into_request().unwrap();
        assert_eq!(request.post_count, 3);
        assert_eq!(request.keywords, vec!["coffee", "summer", "iced"]);
        assert_eq!(request.tone, Tone::Casual);
        assert_eq!(request.length, LengthClass::Long);
        assert_eq!(request.language, "Spanish");
    }

    #[test]
    fn test_unknown_tone_is_rejected() {
        let form = GenerateForm {
            main_topic: "Cold Brew".to_string(),
            number_of_posts: 1,
            tone: Some("sarcastic".to_string()),
            ..Default::default()
        };
        assert!(form.into_request().is_err());
    }

    #[test]
    fn test_articles_query_default_limit() {
        assert_eq!(ArticlesQuery::default().limit(), 10);
        assert_eq!(ArticlesQuery { limit: Some(3) }.limit(), 3);
    }
}

//! REST API handlers
//!
//! HTTP endpoints for blog generation, account and analytics lookups

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    response::Json,
};
use serde_json::{json, Value};

use generator::UsageSummary;
use shared::{store_info, ArticleRecord};

use crate::error::{WebServerError, WebServerResult};
use crate::traits::BlogService;
use crate::types::{AccountResponse, ArticlesQuery, GenerateForm, GenerateResponse};
use crate::web::extract::ShopDomain;

/// Generate a batch of posts - /api/generate
pub async fn generate_posts<S>(
    State(service): State<Arc<S>>,
    ShopDomain(store_id): ShopDomain,
    form: Result<Json<GenerateForm>, JsonRejection>,
) -> WebServerResult<Json<GenerateResponse>>
where
    S: BlogService + 'static,
{
    let Json(form) = form.map_err(|e| WebServerError::InvalidBody { details: e.body_text() })?;
    let request = form.into_request()?;

    store_info!(
        store_id,
        topic = %request.topic,
        posts = request.post_count,
        "Generation requested"
    );

    let outcome = service.generate(request, store_id).await?;
    Ok(Json(GenerateResponse::from(outcome)))
}

/// Current token balance and plan - /api/account
pub async fn get_account<S>(
    State(service): State<Arc<S>>,
    ShopDomain(store_id): ShopDomain,
) -> WebServerResult<Json<AccountResponse>>
where
    S: BlogService + 'static,
{
    let account = service.account(store_id).await?;
    Ok(Json(AccountResponse::from(account)))
}

/// Recent articles, newest first - /api/articles?limit=N
pub async fn list_articles<S>(
    State(service): State<Arc<S>>,
    ShopDomain(store_id): ShopDomain,
    Query(query): Query<ArticlesQuery>,
) -> WebServerResult<Json<Vec<ArticleRecord>>>
where
    S: BlogService + 'static,
{
    let articles = service.articles(store_id, query.limit()).await?;
    Ok(Json(articles))
}

/// Usage summary - /api/analytics
pub async fn get_analytics<S>(
    State(service): State<Arc<S>>,
    ShopDomain(store_id): ShopDomain,
) -> WebServerResult<Json<UsageSummary>>
where
    S: BlogService + 'static,
{
    let summary = service.analytics(store_id).await?;
    Ok(Json(summary))
}

/// Liveness probe - /health
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

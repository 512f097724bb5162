//! Store identity extraction

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use shared::StoreId;

use crate::error::WebServerError;
use crate::types::SHOP_DOMAIN_HEADER;

/// Store identity taken from the `X-Shop-Domain` header set by the upstream auth layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopDomain(pub StoreId);

#[async_trait]
impl<S> FromRequestParts<S> for ShopDomain
where
    S: Send + Sync,
{
    type Rejection = WebServerError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(SHOP_DOMAIN_HEADER)
            .ok_or(WebServerError::MissingStoreHeader { header: SHOP_DOMAIN_HEADER })?;
        let raw = value
            .to_str()
            .map_err(|_| WebServerError::InvalidStoreHeader { header: SHOP_DOMAIN_HEADER })?;
        Ok(ShopDomain(StoreId::new(raw)?))
    }
}

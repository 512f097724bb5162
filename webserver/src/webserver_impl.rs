//! Main webserver implementation
//!
//! Wires the blog service into an axum router and serves it until shutdown.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use shared::logging::{self, ServiceId};

use crate::error::{WebServerError, WebServerResult};
use crate::traits::BlogService;
use crate::web::handlers::api;

/// HTTP host for a blog service
pub struct WebServer<S>
where
    S: BlogService + 'static,
{
    bind_address: SocketAddr,
    service: Arc<S>,
}

impl<S> WebServer<S>
where
    S: BlogService + 'static,
{
    pub fn new(bind_address: SocketAddr, service: S) -> Self {
        Self { bind_address, service: Arc::new(service) }
    }

    /// Build the Axum router with all routes
    pub fn build_router(&self) -> Router {
        build_router(Arc::clone(&self.service))
    }

    /// Serve until Ctrl+C
    pub async fn run(&self) -> WebServerResult<()> {
        let router = self.build_router();

        let listener = tokio::net::TcpListener::bind(self.bind_address)
            .await
            .map_err(|e| WebServerError::ServerStartup(format!("Failed to bind to {}: {}", self.bind_address, e)))?;

        info!(address = %self.bind_address, "🌐 Web server listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

/// Router over a shared service; also used directly by tests
pub fn build_router<S>(service: Arc<S>) -> Router
where
    S: BlogService + 'static,
{
    Router::new()
        .route("/api/generate", post(api::generate_posts::<S>))
        .route("/api/account", get(api::get_account::<S>))
        .route("/api/articles", get(api::list_articles::<S>))
        .route("/api/analytics", get(api::get_analytics::<S>))
        .route("/health", get(api::health_check))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(service)
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => logging::log_shutdown(ServiceId::current(), "Received Ctrl+C signal"),
        Err(err) => logging::log_error(ServiceId::current(), "Signal handling", &err),
    }
}

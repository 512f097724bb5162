//! Webserver library for the blog generation system
//!
//! Thin HTTP host over the generation orchestrator. Store identity comes
//! from the `X-Shop-Domain` header supplied by the upstream auth layer.

pub mod error;
pub mod services;
pub mod traits;
pub mod types;
pub mod web;
pub mod webserver_impl;

// Re-export main types
pub use error::{WebServerError, WebServerResult};
pub use webserver_impl::{build_router, WebServer};
pub use types::*;

// Re-export trait definitions
pub use traits::{BlogService, MockBlogService};

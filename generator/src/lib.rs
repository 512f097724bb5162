//! Generator library for the blog generation system
//!
//! This library runs the token-metered generation workflow: it checks a
//! store's quota, asks an external text generator for a batch of posts,
//! enriches them with stock images, saves them and deducts the quota.

pub mod error;
pub mod types;
pub mod traits;
pub mod config;
pub mod core;
pub mod generator_impl;
pub mod services;

// Re-export main types
pub use error::{GeneratorError, GeneratorResult, StoreError, StoreResult};
pub use types::*;
pub use traits::*;
pub use config::GeneratorConfig;
pub use core::{Interpretation, PromptSpec, UsageSummary};
pub use generator_impl::GenerationOrchestrator;
pub use services::*;

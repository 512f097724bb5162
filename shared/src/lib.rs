//! Shared types for the blog generation system
//!
//! Holds the data model shared by the generator core and the web host:
//! store accounts and plans, generation requests, generated posts and
//! persisted articles, plus logging setup.

pub mod types;
pub mod posts;
pub mod errors;
pub mod logging;

pub use types::*;
pub use posts::*;
pub use errors::*;

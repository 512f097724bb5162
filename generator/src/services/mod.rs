//! Generator services implementations

pub mod gemini_client;
pub mod pexels_client;
pub mod memory_store;
pub mod sqlite_store;

#[cfg(test)]
pub mod tests;

pub use gemini_client::*;
pub use pexels_client::*;
pub use memory_store::*;
pub use sqlite_store::*;

//! HTTP layer: extractors and handlers

pub mod extract;
pub mod handlers;

//! Tests for generator service components
//!
//! Store tests run against both implementations; client tests run against a
//! local mock HTTP server.

pub mod gemini_client;

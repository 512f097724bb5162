//! Generator-specific data types

use serde::{Deserialize, Serialize};

use shared::ArticleRecord;

/// Outcome of a guarded quota decrement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeductOutcome {
    /// Balance was large enough and has been decremented
    Applied { tokens_remaining: u32 },
    /// Balance was too small; nothing changed
    Rejected { tokens_remaining: u32 },
}

impl DeductOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, DeductOutcome::Applied { .. })
    }
}

/// Success payload of a generation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationOutcome {
    pub posts: Vec<ArticleRecord>,
    pub tokens_used: u32,
    pub tokens_remaining: u32,
    /// True when the generator output could not be read as structured posts
    pub used_fallback: bool,
}

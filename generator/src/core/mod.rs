//! Generator core business logic

pub mod analytics;
pub mod interpreter;
pub mod prompt;

pub use analytics::UsageSummary;
pub use interpreter::{fallback_draft, interpret, Interpretation};
pub use prompt::PromptSpec;

//! Interpretation of raw generator output

use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;

use shared::PostDraft;

/// Result of reading generator output as the requested post list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interpretation {
    Structured(Vec<PostDraft>),
    Unstructured(String),
}

#[derive(Deserialize)]
struct PostList {
    posts: Vec<PostDraft>,
}

fn fence_regex() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| {
        Regex::new(r"(?s)^\s*```[A-Za-z]*\s*\n(.*?)\n?\s*```\s*$").expect("fence pattern is valid")
    })
}

/// Strip one Markdown code fence wrapping the whole text, if present
fn unfenced(raw: &str) -> &str {
    fence_regex()
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(raw)
}

/// Read raw output as `{"posts": [...]}`; anything else is unstructured
pub fn interpret(raw: &str) -> Interpretation {
    match serde_json::from_str::<PostList>(unfenced(raw).trim()) {
        Ok(list) if !list.posts.is_empty() => Interpretation::Structured(list.posts),
        _ => Interpretation::Unstructured(raw.to_string()),
    }
}

/// Single post built around unstructured output
pub fn fallback_draft(topic: &str, raw: &str) -> PostDraft {
    PostDraft {
        title: topic.to_string(),
        meta_description: format!("Learn about {topic}"),
        content: raw.to_string(),
        image_description: format!("Image related to {topic}"),
    }
}

impl Interpretation {
    /// Posts to enrich and persist, using the fallback for unstructured output
    pub fn into_drafts(self, topic: &str) -> Vec<PostDraft> {
        match self {
            Interpretation::Structured(posts) => posts,
            Interpretation::Unstructured(raw) => vec![fallback_draft(topic, &raw)],
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, Interpretation::Structured(_))
    }
}

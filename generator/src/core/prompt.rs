//! Prompt construction for batch post generation

use shared::{GenerationRequest, LengthClass, Tone};

/// Everything the generator needs to know about one batch
#[derive(Debug, Clone, PartialEq)]
pub struct PromptSpec {
    pub topic: String,
    pub keywords: Vec<String>,
    pub tone: Tone,
    pub audience: String,
    pub length: LengthClass,
    pub language: String,
    pub post_count: u32,
}

impl PromptSpec {
    pub fn from_request(request: &GenerationRequest) -> Self {
        Self {
            topic: request.topic.trim().to_string(),
            keywords: request.keywords.clone(),
            tone: request.tone,
            audience: request.audience.trim().to_string(),
            length: request.length,
            language: request.language.trim().to_string(),
            post_count: request.post_count,
        }
    }

    /// Render the single plain-text prompt sent for the whole batch
    pub fn render(&self) -> String {
        let plural = if self.post_count > 1 { "s" } else { "" };
        let keywords = if self.keywords.is_empty() {
            "none".to_string()
        } else {
            self.keywords.join(", ")
        };
        let audience = if self.audience.is_empty() { "general readers" } else { &self.audience };

        format!(
            r#"Create {count} SEO and AI search optimized blog post{plural} about "{topic}".

Requirements:
- Tone: {tone}
- Target audience: {audience}
- Length: {length} (~{words} words)
- Language: {language}
- Keywords to include: {keywords}
- Optimize for both Google SEO and AI search engines (ChatGPT, Perplexity, Gemini, Claude)
- Include H2 and H3 headings
- Add call-to-action suggestions
- Include Q&A snippets within the content
- Create engaging, valuable content

For each post, provide:
1. SEO-optimized title
2. Meta description
3. Full blog content with proper structure
4. Suggested featured image description

Respond with JSON only, using exactly this structure and {count} element{plural} in "posts":
{{
  "posts": [
    {{
      "title": "SEO optimized title",
      "metaDescription": "SEO meta description",
      "content": "Full blog content with H2/H3 headings",
      "imageDescription": "Description for featured image"
    }}
  ]
}}"#,
            count = self.post_count,
            plural = plural,
            topic = self.topic,
            tone = self.tone,
            audience = audience,
            length = self.length,
            words = self.length.target_words(),
            language = self.language,
            keywords = keywords,
        )
    }
}

use crate::error::GenerationError;
use async_trait::async_trait;
use intern_core::POST_CHAR_LIMIT;

const ELLIPSIS: &str = "...";

#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Turn a prompt into post text of at most 280 characters.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Normalize raw completion text: strip whitespace and wrapping quotes,
/// then cap the length.
pub fn tidy_completion(raw: &str) -> String {
    let cleaned = raw.trim().trim_matches('"').trim();
    truncate_post(cleaned)
}

/// Anything over the limit keeps its first 277 characters plus `...`.
pub fn truncate_post(text: &str) -> String {
    if text.chars().count() <= POST_CHAR_LIMIT {
        return text.to_string();
    }
    let keep = POST_CHAR_LIMIT - ELLIPSIS.len();
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

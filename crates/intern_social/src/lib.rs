//! Outbound posting. The generation cycle never depends on these types;
//! the binary hands finished text to a [`Publisher`] after recording it.

pub mod twitter;

use async_trait::async_trait;
use thiserror::Error;

pub use twitter::TwitterClient;

#[derive(Debug, Error)]
pub enum PostError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("unexpected response: {0}")]
    Parse(String),
}

#[async_trait]
pub trait Publisher: Send + Sync {
    /// Publish finished text and return the id the service assigned it.
    async fn publish(&self, text: &str) -> Result<String, PostError>;
}

use crate::{PostError, Publisher};
use anyhow::{Context, Result};
use async_trait::async_trait;
use intern_core::TwitterConfig;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use url::Url;

/// X/Twitter API v2 client using an OAuth 2.0 user-context bearer token.
pub struct TwitterClient {
    api_base: Url,
    bearer_token: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
struct CreatedTweet {
    id: String,
}

#[derive(Debug, Deserialize)]
struct Me {
    username: String,
}

impl TwitterClient {
    pub fn new(config: &TwitterConfig) -> Result<Self> {
        if config.bearer_token.trim().is_empty() {
            anyhow::bail!("TWITTER_BEARER_TOKEN is empty");
        }
        let api_base = Url::parse(&config.api_base)
            .with_context(|| format!("Invalid Twitter API base URL: {}", config.api_base))?;
        Ok(Self {
            api_base,
            bearer_token: config.bearer_token.clone(),
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .context("Failed to build HTTP client")?,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base.as_str().trim_end_matches('/'), path)
    }

    async fn send_checked(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, PostError> {
        let response = request.bearer_auth(&self.bearer_token).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PostError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Check the token by asking who it belongs to. Returns the username.
    pub async fn verify_credentials(&self) -> Result<String, PostError> {
        let response = self
            .send_checked(self.client.get(self.endpoint("/2/users/me")))
            .await?;
        let me: Envelope<Me> = response.json().await?;
        let me = me
            .data
            .ok_or_else(|| PostError::Parse("missing data in /2/users/me response".to_string()))?;
        Ok(me.username)
    }
}

#[async_trait]
impl Publisher for TwitterClient {
    async fn publish(&self, text: &str) -> Result<String, PostError> {
        let response = self
            .send_checked(
                self.client
                    .post(self.endpoint("/2/tweets"))
                    .json(&json!({ "text": text })),
            )
            .await?;
        let created: Envelope<CreatedTweet> = response.json().await?;
        let id = created
            .data
            .map(|d| d.id)
            .ok_or_else(|| PostError::Parse("missing data.id in create response".to_string()))?;
        tracing::info!("Tweet posted successfully: {}", id);
        Ok(id)
    }
}

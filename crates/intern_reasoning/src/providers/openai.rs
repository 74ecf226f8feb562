//! OpenAI-compatible chat completions (OpenRouter, OpenAI, local gateways).

use crate::error::{FailureCause, GenerationError};
use crate::llm::{tidy_completion, LlmClient};
use anyhow::{Context, Result};
use intern_core::LlmConfig;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    url: String,
    model: String,
    temperature: f64,
}

impl OpenAiClient {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .context("LLM_API_KEY is not set")?;
        let base_url = config.base_url.trim_end_matches('/');

        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()
                .context("Failed to build HTTP client")?,
            api_key,
            url: format!("{}/chat/completions", base_url),
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }

    fn payload(&self, prompt: &str) -> Value {
        json!({
            "model": self.model,
            "messages": [
                {
                    "role": "user",
                    "content": prompt
                }
            ],
            "temperature": self.temperature,
        })
    }
}

/// Pull `choices[0].message.content` out of a chat completion body.
fn extract_content(body: &Value) -> Result<&str, GenerationError> {
    let choice = body["choices"]
        .get(0)
        .ok_or(FailureCause::MissingField("choices[0]"))?;
    let content = choice["message"]["content"]
        .as_str()
        .ok_or(FailureCause::MissingField("choices[0].message.content"))?;
    Ok(content)
}

#[async_trait::async_trait]
impl LlmClient for OpenAiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        tracing::debug!(model = %self.model, url = %self.url, "Requesting completion");

        let response = self
            .client
            .post(&self.url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&self.payload(prompt))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FailureCause::Status {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let bytes = response.bytes().await?;
        let body: Value = serde_json::from_slice(&bytes)?;
        let text = tidy_completion(extract_content(&body)?);
        tracing::debug!("Completion is {} characters", text.chars().count());
        Ok(text)
    }
}

pub mod mock;
pub mod openai;

pub use mock::MockProvider;
pub use openai::OpenAiClient;

use crate::llm::LlmClient;
use anyhow::{bail, Result};
use intern_core::LlmConfig;
use std::sync::Arc;

/// Pick the generation backend named in config.
pub fn from_config(config: &LlmConfig) -> Result<Arc<dyn LlmClient>> {
    match config.provider.as_str() {
        "openrouter" | "openai" => Ok(Arc::new(OpenAiClient::new(config)?)),
        "mock" => Ok(Arc::new(MockProvider::new(&config.model))),
        other => bail!("Unknown LLM provider: {}", other),
    }
}

//! Mock LLM Provider — deterministic responses for testing without API keys.

use crate::error::GenerationError;
use crate::llm::{tidy_completion, LlmClient};
use std::collections::VecDeque;
use std::sync::Mutex;

#[derive(Debug)]
pub struct MockProvider {
    model: String,
    scripted: Mutex<VecDeque<Result<String, String>>>,
    prompts: Mutex<Vec<String>>,
}

impl MockProvider {
    pub fn new(model: &str) -> Self {
        Self {
            model: model.to_string(),
            scripted: Mutex::new(VecDeque::new()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Queue a raw completion to hand out on the next call.
    pub fn with_response(self, text: impl Into<String>) -> Self {
        self.push(Ok(text.into()));
        self
    }

    /// Queue a failure for the next call.
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.push(Err(message.into()));
        self
    }

    fn push(&self, item: Result<String, String>) {
        if let Ok(mut queue) = self.scripted.lock() {
            queue.push_back(item);
        }
    }

    /// Every prompt received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl LlmClient for MockProvider {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        let next = self
            .scripted
            .lock()
            .map_err(|_| GenerationError::other("mock provider lock poisoned"))?
            .pop_front();

        match next {
            Some(Ok(text)) => Ok(tidy_completion(&text)),
            Some(Err(message)) => Err(GenerationError::other(message)),
            None => Ok(format!(
                "(Mock {} response) Another day, another stand-up.",
                self.model
            )),
        }
    }
}

use crate::error::{CycleError, GenerationError};
use crate::llm::LlmClient;
use crate::prompts::PromptBuilder;
use chrono::NaiveDateTime;
use intern_core::{Memory, PersonaConfig, ProjectConfig, RecordKind};
use intern_memory::MemoryStore;
use std::sync::Arc;

/// Produces posts in character and records them as memories.
pub struct TweetGenerator {
    client: Arc<dyn LlmClient>,
    persona: PersonaConfig,
    project: ProjectConfig,
}

impl TweetGenerator {
    pub fn new(client: Arc<dyn LlmClient>, persona: PersonaConfig, project: ProjectConfig) -> Self {
        Self {
            client,
            persona,
            project,
        }
    }

    pub fn build_prompt(&self, store: &MemoryStore, now: NaiveDateTime) -> String {
        PromptBuilder::new(&self.persona, &self.project).build_prompt(store, now)
    }

    /// Build the prompt and ask the backend for a post. Empty output counts
    /// as a failure.
    pub async fn generate_tweet(
        &self,
        store: &MemoryStore,
        now: NaiveDateTime,
    ) -> Result<String, GenerationError> {
        let prompt = self.build_prompt(store, now);
        let text = self.client.generate(&prompt).await?;
        if text.trim().is_empty() {
            return Err(GenerationError::empty());
        }
        Ok(text)
    }

    /// Generate a post and append it to the store.
    ///
    /// Nothing is recorded unless generation produced usable text.
    pub async fn generate_and_record(
        &self,
        store: &mut MemoryStore,
        kind: RecordKind,
        now: NaiveDateTime,
    ) -> Result<Memory, CycleError> {
        let text = self.generate_tweet(store, now).await?;
        let memory = Memory::new(text, now, kind.importance(), kind.category())?;
        store.append(memory.clone())?;
        tracing::info!(
            "Recorded {} memory #{} ({} chars)",
            kind.category(),
            store.count(),
            memory.text().chars().count()
        );
        Ok(memory)
    }
}

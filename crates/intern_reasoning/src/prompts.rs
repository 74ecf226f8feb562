use chrono::NaiveDateTime;
use intern_core::{Memory, PersonaConfig, ProjectConfig, POST_CHAR_LIMIT};
use intern_memory::{MemoryStore, DEFAULT_RECENT};

const NO_RECENT: &str = "No previous events yet.";
const NO_MILESTONES: &str = "No significant milestones yet.";

/// Assembles the generation prompt from persona, project stage and memory.
///
/// Output depends only on its inputs: the same memories and the same date
/// always produce the same prompt.
pub struct PromptBuilder<'a> {
    persona: &'a PersonaConfig,
    project: &'a ProjectConfig,
}

impl<'a> PromptBuilder<'a> {
    pub fn new(persona: &'a PersonaConfig, project: &'a ProjectConfig) -> Self {
        Self { persona, project }
    }

    pub fn build_prompt(&self, store: &MemoryStore, now: NaiveDateTime) -> String {
        let recent = format_memories(store.recent(DEFAULT_RECENT), NO_RECENT);
        let milestones = format_memories(store.milestones(), NO_MILESTONES);

        format!(
            "{profile}\n\n\
{project}\n\n\
Recent events in your work life:\n{recent}\n\n\
Important past milestones:\n{milestones}\n\n\
Today is {date}, a {weekday}.\n\n\
Write a single tweet (max {limit} characters) about your work experience today.\n\
Stay in character, be specific about technical details when appropriate, and maintain narrative continuity.\n\
Don't use hashtags unless they're meaningful to the content.",
            profile = self.persona.format_profile(),
            project = self.project.format_details(store.count()),
            recent = recent,
            milestones = milestones,
            date = now.format("%Y-%m-%d"),
            weekday = now.format("%A"),
            limit = POST_CHAR_LIMIT,
        )
    }
}

fn format_memories(memories: Vec<&Memory>, placeholder: &str) -> String {
    if memories.is_empty() {
        return placeholder.to_string();
    }
    memories
        .iter()
        .map(|m| format!("- {}", m.dated_line()))
        .collect::<Vec<_>>()
        .join("\n")
}

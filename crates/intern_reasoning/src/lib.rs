pub mod error;
pub mod generator;
pub mod llm;
pub mod prompts;
pub mod providers;

pub use error::{CycleError, FailureCause, GenerationError};
pub use generator::TweetGenerator;
pub use llm::LlmClient;
pub use prompts::PromptBuilder;

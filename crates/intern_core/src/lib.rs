pub mod config;
pub mod memory;
pub mod persona;

pub use config::{InternConfig, LlmConfig, StorageConfig, TwitterConfig};
pub use memory::{importance, Memory, MemoryError, RecordKind, MILESTONE_THRESHOLD, POST_CHAR_LIMIT};
pub use persona::{stage_index, ConfigError, PersonaConfig, ProjectConfig, ProjectStages};

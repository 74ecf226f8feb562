use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How many memories it takes to advance one project stage.
pub const MEMORIES_PER_STAGE: usize = 3;

/// The fixed character the bot writes as.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonaConfig {
    pub name: String,
    pub role: String,
    pub company: String,
    pub personality: String,
    pub company_description: String,
}

impl Default for PersonaConfig {
    fn default() -> Self {
        Self {
            name: "Vedant".to_string(),
            role: "junior developer".to_string(),
            company: "Ai TechNova Solutions".to_string(),
            personality: "Enthusiastic but sometimes overwhelmed.\n\
Loves problem-solving and learning new technologies.\n\
Has a dry sense of humor when stressed.\n\
He looks good and has good networking skills."
                .to_string(),
            company_description:
                "Ai TechNova Solutions is a startup that provides AI solutions to businesses."
                    .to_string(),
        }
    }
}

impl PersonaConfig {
    /// Persona introduction, the first section of every prompt.
    pub fn format_profile(&self) -> String {
        format!(
            "You are {}, a {} working at {}.\nYour personality: {}",
            self.name, self.role, self.company, self.personality
        )
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("project stage list must not be empty")]
    NoStages,
}

/// Ordered narrative phases. Never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct ProjectStages(Vec<String>);

impl ProjectStages {
    pub fn new(stages: Vec<String>) -> Result<Self, ConfigError> {
        if stages.is_empty() {
            return Err(ConfigError::NoStages);
        }
        Ok(Self(stages))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; construction rejects an empty list.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Every three memories advance one stage, clamped at the final stage.
    pub fn index_for(&self, total_memories: usize) -> usize {
        stage_index(total_memories, self.0.len())
    }

    pub fn current(&self, total_memories: usize) -> &str {
        &self.0[self.index_for(total_memories)]
    }
}

impl TryFrom<Vec<String>> for ProjectStages {
    type Error = ConfigError;

    fn try_from(stages: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(stages)
    }
}

impl From<ProjectStages> for Vec<String> {
    fn from(stages: ProjectStages) -> Self {
        stages.0
    }
}

impl Default for ProjectStages {
    fn default() -> Self {
        Self(
            DEFAULT_STAGES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        )
    }
}

/// `min(total / 3, stage_count - 1)`; zero when there are no stages.
pub fn stage_index(total_memories: usize, stage_count: usize) -> usize {
    (total_memories / MEMORIES_PER_STAGE).min(stage_count.saturating_sub(1))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub description: String,
    pub stages: ProjectStages,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            description: "Building a Spring Boot service to fetch data from SFTP and store in Snowflake DB all while following best practices.\n\
It is to be ensured that the service is robust and can handle errors gracefully.\n\
There should be a logging mechanism too to track the data flow.\n\
The service should also be able to handle large files and transfer them securely.\n\
The file type is JSON and the data needs to be transformed before storing in the DB."
                .to_string(),
            stages: ProjectStages::default(),
        }
    }
}

impl ProjectConfig {
    pub fn format_details(&self, total_memories: usize) -> String {
        format!(
            "Your current project: {}\nCurrent project stage: {}",
            self.description,
            self.stages.current(total_memories)
        )
    }
}

const DEFAULT_STAGES: &[&str] = &[
    "onboarding and environment setup",
    "learning about the SFTP requirements",
    "designing initial Spring Boot service structure",
    "exploring Snowflake DB features",
    "exploring SFTP client libraries for Java",
    "exploring the sftp file structure and data format",
    "connecting with the project manager for clarifications",
    "implementing SFTP client connection",
    "adding error handling for SFTP transfers",
    "implementing logging mechanism",
    "handling large file transfers",
    "implementing secure file transfers",
    "exploring Postgres DB features",
    "learning about postgres DB schema design",
    "learning about integrating postgres with Spring Boot",
    "implementing a data logging mechanism to log the files ingested and relevant meta data in a postgres DB",
    "exploring JSON parsing libraries for Java",
    "designing Snowflake DB schema",
    "implementing data transformation logic",
    "setting up integration tests",
    "preparing for code review",
    "addressing code review feedback",
    "preparing for deployment",
];

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::persona::{PersonaConfig, ProjectConfig};

// ============================================================================
// Top-level config
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InternConfig {
    pub persona: PersonaConfig,
    pub project: ProjectConfig,
    pub llm: LlmConfig,
    pub storage: StorageConfig,
    pub twitter: Option<TwitterConfig>,
}

impl InternConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    /// After loading, env var overrides are applied.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
        let mut config = Self::parse(&content)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse TOML without touching the environment.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).with_context(|| "Failed to parse TOML config")
    }

    /// Load from path; only a missing file falls back to defaults (with env
    /// overrides). A file that exists but can't be read or parsed is an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let mut config = Self::parse(&content)
                    .with_context(|| format!("Invalid config file: {}", path.display()))?;
                config.apply_env_overrides();
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("Config file {} not found, using defaults", path.display());
                let mut config = Self::default();
                config.apply_env_overrides();
                Ok(config)
            }
            Err(e) => Err(e)
                .with_context(|| format!("Failed to read config file: {}", path.display())),
        }
    }

    /// Apply environment variable overrides on top of file-based config.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("LLM_PROVIDER") {
            self.llm.provider = v;
        }
        if let Some(v) = lookup("LLM_MODEL") {
            self.llm.model = v;
        }
        if let Some(v) = lookup("LLM_BASE_URL") {
            self.llm.base_url = v;
        }
        if let Some(v) = lookup("LLM_API_KEY") {
            self.llm.api_key = Some(v);
        }
        if let Some(v) = lookup("LLM_TEMPERATURE") {
            match v.parse() {
                Ok(n) => self.llm.temperature = n,
                Err(_) => tracing::warn!("Ignoring unparsable LLM_TEMPERATURE={}", v),
            }
        }
        if let Some(v) = lookup("LLM_TIMEOUT_SECS") {
            match v.parse() {
                Ok(n) => self.llm.timeout_secs = n,
                Err(_) => tracing::warn!("Ignoring unparsable LLM_TIMEOUT_SECS={}", v),
            }
        }
        if let Some(v) = lookup("MEMORY_FILE") {
            self.storage.memory_file = PathBuf::from(v);
        }
        // Twitter env overrides
        if let Some(token) = lookup("TWITTER_BEARER_TOKEN") {
            let api_base = lookup("TWITTER_API_BASE")
                .or_else(|| self.twitter.as_ref().map(|t| t.api_base.clone()))
                .unwrap_or_else(default_twitter_api_base);
            self.twitter = Some(TwitterConfig {
                bearer_token: token,
                api_base,
            });
        } else if let (Some(base), Some(twitter)) = (lookup("TWITTER_API_BASE"), self.twitter.as_mut()) {
            twitter.api_base = base;
        }
    }
}

// ============================================================================
// Sub-configs
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// `openrouter`, `openai` or `mock`.
    pub provider: String,
    pub model: String,
    pub base_url: String,
    pub api_key: Option<String>,
    /// Kept high so consecutive posts don't read alike.
    pub temperature: f64,
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openrouter".to_string(),
            model: "tbd".to_string(),
            base_url: "https://openrouter.ai/api/v1".to_string(),
            api_key: None,
            temperature: 2.0,
            timeout_secs: 60,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub memory_file: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            memory_file: PathBuf::from("data").join("memories.json"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TwitterConfig {
    pub bearer_token: String,
    #[serde(default = "default_twitter_api_base")]
    pub api_base: String,
}

fn default_twitter_api_base() -> String {
    "https://api.twitter.com".to_string()
}

// ============================================================================
// Tests
// ============================================================================

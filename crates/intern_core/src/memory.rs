use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// Importance at or above which a memory counts as a milestone.
pub const MILESTONE_THRESHOLD: f64 = 2.5;

/// Hard cap on the length of a generated post, in characters.
pub const POST_CHAR_LIMIT: usize = 280;

/// Conventional importance scores.
pub mod importance {
    pub const NORMAL: f64 = 1.0;
    pub const SIGNIFICANT: f64 = 2.0;
    pub const MILESTONE: f64 = 3.0;
}

#[derive(Debug, Error, PartialEq)]
pub enum MemoryError {
    #[error("memory text is empty")]
    EmptyText,

    #[error("importance must be a non-negative number, got {0}")]
    InvalidImportance(f64),
}

/// One previously generated post.
///
/// Values are immutable once built: fields are private and there are no
/// setters. A correction is recorded as a new memory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MemoryRecord", into = "MemoryRecord")]
pub struct Memory {
    text: String,
    timestamp: NaiveDateTime,
    importance: f64,
    category: String,
    metadata: BTreeMap<String, Value>,
}

/// On-disk shape of a memory. Validated into [`Memory`] on read.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MemoryRecord {
    text: String,
    timestamp: NaiveDateTime,
    importance: f64,
    category: String,
    #[serde(default)]
    metadata: BTreeMap<String, Value>,
}

impl Memory {
    pub fn new(
        text: impl Into<String>,
        timestamp: NaiveDateTime,
        importance: f64,
        category: impl Into<String>,
    ) -> Result<Self, MemoryError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(MemoryError::EmptyText);
        }
        if !importance.is_finite() || importance < 0.0 {
            return Err(MemoryError::InvalidImportance(importance));
        }
        Ok(Self {
            text,
            timestamp,
            importance,
            category: category.into(),
            metadata: BTreeMap::new(),
        })
    }

    /// Attach extra metadata. Only usable while the value is being built.
    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn importance(&self) -> f64 {
        self.importance
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn metadata(&self) -> &BTreeMap<String, Value> {
        &self.metadata
    }

    pub fn is_milestone(&self) -> bool {
        self.importance >= MILESTONE_THRESHOLD
    }

    /// `YYYY-MM-DD: text`, the form used when surfacing a memory in a prompt.
    pub fn dated_line(&self) -> String {
        format!("{}: {}", self.timestamp.format("%Y-%m-%d"), self.text)
    }
}

impl TryFrom<MemoryRecord> for Memory {
    type Error = MemoryError;

    fn try_from(record: MemoryRecord) -> Result<Self, Self::Error> {
        let memory = Memory::new(
            record.text,
            record.timestamp,
            record.importance,
            record.category,
        )?;
        Ok(Self {
            metadata: record.metadata,
            ..memory
        })
    }
}

impl From<Memory> for MemoryRecord {
    fn from(memory: Memory) -> Self {
        Self {
            text: memory.text,
            timestamp: memory.timestamp,
            importance: memory.importance,
            category: memory.category,
            metadata: memory.metadata,
        }
    }
}

/// What kind of entry a generate-and-record cycle produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Daily,
    Milestone,
}

impl RecordKind {
    pub fn importance(self) -> f64 {
        match self {
            RecordKind::Daily => importance::NORMAL,
            RecordKind::Milestone => importance::MILESTONE,
        }
    }

    pub fn category(self) -> &'static str {
        match self {
            RecordKind::Daily => "daily",
            RecordKind::Milestone => "milestone",
        }
    }
}

use intern_core::MemoryError;
use intern_memory::StoreError;
use thiserror::Error;

/// Every way a backend can fail to turn a prompt into text collapses into
/// this one error. The cause is kept for diagnostics.
#[derive(Debug, Error)]
#[error("generation failed: {cause}")]
pub struct GenerationError {
    #[source]
    cause: FailureCause,
}

#[derive(Debug, Error)]
pub enum FailureCause {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not parse response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("response is missing {0}")]
    MissingField(&'static str),

    #[error("generated text is empty")]
    Empty,

    #[error("{0}")]
    Other(String),
}

impl GenerationError {
    pub fn cause(&self) -> &FailureCause {
        &self.cause
    }

    pub fn empty() -> Self {
        FailureCause::Empty.into()
    }

    pub fn other(message: impl Into<String>) -> Self {
        FailureCause::Other(message.into()).into()
    }
}

impl From<FailureCause> for GenerationError {
    fn from(cause: FailureCause) -> Self {
        Self { cause }
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(e: reqwest::Error) -> Self {
        FailureCause::Transport(e).into()
    }
}

impl From<serde_json::Error> for GenerationError {
    fn from(e: serde_json::Error) -> Self {
        FailureCause::Decode(e).into()
    }
}

/// A generate-and-record cycle that stopped before or while recording.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("generated text was rejected as a memory: {0}")]
    InvalidMemory(#[from] MemoryError),

    #[error("failed to record memory: {0}")]
    Store(#[from] StoreError),
}

use intern_core::Memory;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// How many memories `recent` surfaces when the caller doesn't say.
pub const DEFAULT_RECENT: usize = 5;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read memory file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write memory file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize memories: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Ordered collection of memories mirrored to a single JSON file.
#[derive(Debug)]
pub struct MemoryStore {
    path: PathBuf,
    memories: Vec<Memory>,
}

impl MemoryStore {
    /// Open the store at `path`, loading whatever is already there.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let memories = Self::load(&path)?;
        tracing::debug!("Loaded {} memories from {}", memories.len(), path.display());
        Ok(Self { path, memories })
    }

    /// Read all memories from `path`.
    ///
    /// A missing file is an empty log. A file that cannot be parsed is logged
    /// and also treated as empty, so a corrupt log never stops the bot.
    pub fn load(path: &Path) -> Result<Vec<Memory>, StoreError> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StoreError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        match serde_json::from_slice::<Vec<Memory>>(&bytes) {
            Ok(memories) => Ok(memories),
            Err(e) => {
                tracing::warn!(
                    "Memory file {} is corrupted ({}). Starting with empty memories.",
                    path.display(),
                    e
                );
                Ok(Vec::new())
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Add a memory and persist the full collection.
    ///
    /// On a write failure the memory stays in the in-memory collection, which
    /// is then ahead of disk until the next successful append.
    pub fn append(&mut self, memory: Memory) -> Result<(), StoreError> {
        self.memories.push(memory);
        self.persist()
    }

    fn persist(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.memories)?;
        write_replacing(&self.path, json.as_bytes())
    }

    /// The `n` most recent memories, newest first. Equal timestamps keep
    /// insertion order.
    pub fn recent(&self, n: usize) -> Vec<&Memory> {
        let mut sorted: Vec<&Memory> = self.memories.iter().collect();
        sorted.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
        sorted.truncate(n);
        sorted
    }

    pub fn milestones(&self) -> Vec<&Memory> {
        self.memories.iter().filter(|m| m.is_milestone()).collect()
    }

    pub fn by_category(&self, category: &str) -> Vec<&Memory> {
        self.memories
            .iter()
            .filter(|m| m.category() == category)
            .collect()
    }

    pub fn count(&self) -> usize {
        self.memories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memories.is_empty()
    }

    /// Every memory in storage order.
    pub fn all(&self) -> &[Memory] {
        &self.memories
    }

    /// Every memory, oldest first.
    pub fn chronological(&self) -> Vec<&Memory> {
        let mut sorted: Vec<&Memory> = self.memories.iter().collect();
        sorted.sort_by_key(|m| m.timestamp());
        sorted
    }

    /// Delete the log at `path` and recreate it empty.
    ///
    /// Returns whether a file existed before the reset.
    pub fn reset(path: &Path) -> Result<bool, StoreError> {
        let existed = match fs::remove_file(path) {
            Ok(()) => true,
            Err(e) if e.kind() == io::ErrorKind::NotFound => false,
            Err(source) => {
                return Err(StoreError::Write {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        write_replacing(path, b"[]")?;
        Ok(existed)
    }
}

/// Write `contents` to a sibling temp file, then rename it over `path`.
fn write_replacing(path: &Path, contents: &[u8]) -> Result<(), StoreError> {
    let write_err = |source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, contents).map_err(write_err)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(write_err(e));
    }
    Ok(())
}

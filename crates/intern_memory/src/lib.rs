//! File-backed memory log.
//!
//! One JSON document holds every memory the bot has produced. Each append
//! rewrites the whole file. There is no locking: two processes appending to
//! the same file race and the last writer wins.

pub mod json_store;

pub use json_store::{MemoryStore, StoreError, DEFAULT_RECENT};

#[cfg(test)]
mod tests;

//! In-memory slot backend.
//!
//! Holds the serialized blob rather than the decoded list, so the encode and
//! decode paths run exactly as they do against a durable backend.

use super::{decode_tasks, encode_tasks, StorageResult, TaskStorage};
use crate::model::task::Task;

/// Volatile storage slot for tests and embedders without a filesystem.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    blob: Option<String>,
}

impl MemoryStorage {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a slot pre-seeded with a raw blob, possibly malformed.
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Some(blob.into()),
        }
    }

    /// Returns the raw blob as last written.
    pub fn blob(&self) -> Option<&str> {
        self.blob.as_deref()
    }
}

impl TaskStorage for MemoryStorage {
    fn load(&self) -> Vec<Task> {
        match &self.blob {
            Some(raw) => decode_tasks(raw).unwrap_or_default(),
            None => Vec::new(),
        }
    }

    fn save(&mut self, tasks: &[Task]) -> StorageResult<()> {
        self.blob = Some(encode_tasks(tasks)?);
        Ok(())
    }
}

//! Persistence port for the task list.
//!
//! # Responsibility
//! - Define the load/save contract over a single named storage slot.
//! - Encode and decode the whole-list blob format shared by all backends.
//!
//! # Invariants
//! - The list is always read and written as one unit, never as a delta.
//! - A missing or malformed blob decodes to the empty list and never raises.
//! - A failed save leaves the backend readable; callers keep in-memory state
//!   authoritative for the current cycle.

use crate::model::task::Task;
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStorage;
pub use sqlite::{open_store_db, open_store_db_in_memory, SqliteSlotStorage};

/// Slot name used when none is given. One slot holds one list.
pub const DEFAULT_SLOT: &str = "todo_task_list";

pub type StorageResult<T> = Result<T, StorageError>;

/// Transport-level storage failure. Decode failures are not represented
/// here: they are recovered as the empty list at the port boundary.
#[derive(Debug)]
pub enum StorageError {
    Sqlite(rusqlite::Error),
    Encode(serde_json::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode task list: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "store schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Abstract load/save boundary to whatever durable store holds the list.
///
/// `load` is total: backends recover missing or malformed data as the empty
/// list. `save` is best-effort: the store reports a failure as a
/// warning-level error without touching in-memory state.
pub trait TaskStorage {
    fn load(&self) -> Vec<Task>;
    fn save(&mut self, tasks: &[Task]) -> StorageResult<()>;
}

/// Serializes the full list into the slot blob format.
pub fn encode_tasks(tasks: &[Task]) -> StorageResult<String> {
    Ok(serde_json::to_string(tasks)?)
}

/// Decodes a slot blob, validating every record.
///
/// Returns `None` when the blob is not the expected array shape or any
/// record fails validation; callers degrade to the empty list.
pub fn decode_tasks(raw: &str) -> Option<Vec<Task>> {
    let tasks: Vec<Task> = match serde_json::from_str(raw) {
        Ok(tasks) => tasks,
        Err(err) => {
            warn!("event=list_decode module=storage status=recovered error={err}");
            return None;
        }
    };

    for task in &tasks {
        if let Err(err) = task.validate() {
            warn!("event=list_decode module=storage status=recovered error={err}");
            return None;
        }
    }

    Some(tasks)
}

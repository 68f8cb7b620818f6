//! Core domain logic for the tasklist tracker.
//! This crate is the single source of truth for list-state invariants.

pub mod dispatch;
pub mod logging;
pub mod model;
pub mod storage;
pub mod store;

pub use dispatch::{resolve, Action, Dispatcher, Payload, Trigger};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{DerivedView, Filter, Task, TaskRow, TaskValidationError};
pub use storage::{
    open_store_db, open_store_db_in_memory, MemoryStorage, SqliteSlotStorage, StorageError,
    StorageResult, TaskStorage, DEFAULT_SLOT,
};
pub use store::task_store::TaskStore;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

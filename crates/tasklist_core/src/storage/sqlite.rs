//! SQLite slot backend.
//!
//! # Responsibility
//! - Open and bootstrap SQLite connections for the slot store.
//! - Persist the whole-list blob under one named slot row.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version` and migrations run
//!   before any slot is read or written.
//! - The slot payload is replaced as one row, never updated field-by-field.
//! - Read failures of any kind degrade to the empty list; only writes
//!   surface errors.

use super::{decode_tasks, encode_tasks, StorageError, StorageResult, TaskStorage};
use crate::model::task::Task;
use log::{error, info, warn};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("migrations/0001_task_slots.sql"),
}];

/// Returns the latest schema version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Opens a slot database file and applies all pending migrations.
pub fn open_store_db(path: impl AsRef<Path>) -> StorageResult<Connection> {
    open_with(Connection::open(path), "file")
}

/// Opens an in-memory slot database and applies all pending migrations.
pub fn open_store_db_in_memory() -> StorageResult<Connection> {
    open_with(Connection::open_in_memory(), "memory")
}

fn open_with(opened: rusqlite::Result<Connection>, mode: &str) -> StorageResult<Connection> {
    let mut conn = match opened {
        Ok(conn) => conn,
        Err(err) => {
            error!("event=db_open module=storage status=error mode={mode} error={err}");
            return Err(err.into());
        }
    };

    match bootstrap_connection(&mut conn) {
        Ok(()) => {
            info!("event=db_open module=storage status=ok mode={mode}");
            Ok(conn)
        }
        Err(err) => {
            error!("event=db_open module=storage status=error mode={mode} error={err}");
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &mut Connection) -> StorageResult<()> {
    conn.busy_timeout(Duration::from_secs(5))?;
    apply_migrations(conn)?;
    Ok(())
}

fn apply_migrations(conn: &mut Connection) -> StorageResult<()> {
    let current = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    let latest = latest_version();

    if current > latest {
        return Err(StorageError::UnsupportedSchemaVersion {
            db_version: current,
            latest_supported: latest,
        });
    }
    if current == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in MIGRATIONS {
        if migration.version <= current {
            continue;
        }
        tx.execute_batch(migration.sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
    }
    tx.commit()?;

    Ok(())
}

/// SQLite-backed storage slot holding the entire serialized list.
pub struct SqliteSlotStorage<'conn> {
    conn: &'conn Connection,
    slot: String,
}

impl<'conn> SqliteSlotStorage<'conn> {
    /// Binds the default slot on an opened connection.
    pub fn new(conn: &'conn Connection) -> Self {
        Self::with_slot(conn, super::DEFAULT_SLOT)
    }

    /// Binds a named slot. One slot per list instance.
    pub fn with_slot(conn: &'conn Connection, slot: impl Into<String>) -> Self {
        Self {
            conn,
            slot: slot.into(),
        }
    }
}

impl TaskStorage for SqliteSlotStorage<'_> {
    fn load(&self) -> Vec<Task> {
        let read = self
            .conn
            .query_row(
                "SELECT payload FROM task_slots WHERE slot = ?1;",
                params![self.slot.as_str()],
                |row| row.get::<_, String>(0),
            )
            .optional();

        match read {
            Ok(Some(raw)) => decode_tasks(&raw).unwrap_or_default(),
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(
                    "event=slot_read module=storage status=recovered slot={} error={err}",
                    self.slot
                );
                Vec::new()
            }
        }
    }

    fn save(&mut self, tasks: &[Task]) -> StorageResult<()> {
        let payload = encode_tasks(tasks)?;
        self.conn.execute(
            "INSERT INTO task_slots (slot, payload) VALUES (?1, ?2)
             ON CONFLICT(slot) DO UPDATE SET payload = excluded.payload;",
            params![self.slot.as_str(), payload],
        )?;
        Ok(())
    }
}

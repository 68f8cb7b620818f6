//! Task record, view filter and derived projection.
//!
//! # Responsibility
//! - Define `Task` with its `{ "name": string, "completed": 0|1 }` wire shape.
//! - Provide validated construction so blank names never enter a list.
//! - Define `Filter` and the per-render `DerivedView` projection.
//!
//! # Invariants
//! - `Task::new` and `Task::validate` reject whitespace-only names.
//! - `Filter` is a pure view parameter and is never persisted.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validation error for task construction and persistence decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Task name is empty or whitespace-only.
    BlankName,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "task name must not be blank"),
        }
    }
}

impl Error for TaskValidationError {}

/// One entry of the task list.
///
/// Serialized as `{ "name": string, "completed": 0|1 }` to match the
/// stored record format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Display text. Non-blank after validated construction.
    pub name: String,
    /// Completion flag, stored as `0|1`.
    #[serde(with = "completed_flag")]
    pub completed: bool,
}

impl Task {
    /// Creates a pending task from a non-blank name.
    pub fn new(name: impl Into<String>) -> Result<Self, TaskValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(TaskValidationError::BlankName);
        }
        Ok(Self {
            name,
            completed: false,
        })
    }

    /// Checks the invariants expected of persisted records.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.name.trim().is_empty() {
            return Err(TaskValidationError::BlankName);
        }
        Ok(())
    }
}

/// View filter over the task list. Holds for one render cycle only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    /// Every task.
    #[default]
    All,
    /// Tasks with `completed == false`.
    Active,
    /// Tasks with `completed == true`.
    Completed,
}

impl Filter {
    /// Parses the selector values used by the trigger surface.
    ///
    /// `"0"` and `"1"` are the `completed` flag value being matched, so
    /// `"0"` selects active tasks and `"1"` completed ones.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "all" => Some(Self::All),
            "0" => Some(Self::Active),
            "1" => Some(Self::Completed),
            _ => None,
        }
    }

    /// Returns whether a task passes this filter.
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.completed,
            Self::Completed => task.completed,
        }
    }
}

/// One visible row of the derived view.
///
/// Carries the task's position in the full list because that position is the
/// identity a follow-up action (`remove-<index>`, `update-<index>`) must
/// target; filtering hides rows but must not renumber them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    /// Index in the full list, valid only against the list state this view
    /// was derived from.
    pub index: usize,
    /// Snapshot of the task at that index.
    pub task: Task,
}

/// Read-only projection of the list for one render cycle.
///
/// Counts are always computed over the full list: changing the filter
/// changes the visible rows, never the footer counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedView {
    /// Rows passing the filter, in list order.
    pub visible_tasks: Vec<TaskRow>,
    /// Tasks with `completed == false`, counted over the full list.
    pub active_count: usize,
    /// Tasks with `completed == true`, counted over the full list.
    pub completed_count: usize,
    /// True when the list is non-empty and nothing is left active.
    pub all_completed: bool,
    /// True when the list is non-empty; the footer is hidden otherwise.
    pub show_footer: bool,
}

mod completed_flag {
    //! Serde shim persisting the completed flag as `0|1`. Plain booleans are
    //! accepted on input so older blobs stay readable.

    use serde::de::{self, Unexpected, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt::{self, Formatter};

    pub fn serialize<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FlagVisitor;

        impl Visitor<'_> for FlagVisitor {
            type Value = bool;

            fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.write_str("0, 1, or a boolean")
            }

            fn visit_bool<E>(self, value: bool) -> Result<bool, E>
            where
                E: de::Error,
            {
                Ok(value)
            }

            fn visit_u64<E>(self, value: u64) -> Result<bool, E>
            where
                E: de::Error,
            {
                match value {
                    0 => Ok(false),
                    1 => Ok(true),
                    other => Err(E::invalid_value(Unexpected::Unsigned(other), &self)),
                }
            }

            fn visit_i64<E>(self, value: i64) -> Result<bool, E>
            where
                E: de::Error,
            {
                match value {
                    0 => Ok(false),
                    1 => Ok(true),
                    other => Err(E::invalid_value(Unexpected::Signed(other), &self)),
                }
            }
        }

        deserializer.deserialize_any(FlagVisitor)
    }
}

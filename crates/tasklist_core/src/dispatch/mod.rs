//! Trigger resolution into typed actions.
//!
//! # Responsibility
//! - Map raw UI triggers (control name plus optional payload) into exactly
//!   one `Action` variant, constructed once and never re-parsed downstream.
//! - Track transient per-render edit-mode state.
//!
//! # Invariants
//! - Fixed trigger names win over the `<verb>-<index>` pattern, so
//!   `clear-completed` is never read as a verb with a bad index.
//! - Unknown triggers resolve to `Action::None`, never an error.
//! - Edit mode survives exactly one trigger: any following trigger clears it.

use once_cell::sync::Lazy;
use regex::Regex;

static VERB_INDEX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([a-z_]+)-([0-9]+)$").expect("valid trigger regex"));

/// Typed mutation request applied to the task list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Append a pending task with the given name.
    Add(String),
    /// Replace the name of the task at `index`.
    Rename { index: usize, name: String },
    /// Set the completed flag of the task at `index`.
    Toggle { index: usize, completed: bool },
    /// Set the completed flag on every task.
    ToggleAll(bool),
    /// Remove the task at `index`.
    Remove(usize),
    /// Remove every completed task.
    ClearCompleted,
    /// Unrecognized or non-mutating trigger. Applies as a no-op.
    None,
}

/// Optional value carried by the firing control.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Payload {
    #[default]
    Empty,
    /// Text field value: the new task name or an edited row name.
    Text(String),
    /// Checkbox value: a row checkbox or the select-all control.
    Flag(bool),
}

/// One UI event: the name of the control that fired plus its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    pub name: String,
    pub payload: Payload,
}

impl Trigger {
    /// A trigger carrying no payload.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            payload: Payload::Empty,
        }
    }

    /// A trigger carrying a text field value.
    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            payload: Payload::Text(text.into()),
        }
    }

    /// A trigger carrying a checkbox value.
    pub fn with_flag(name: impl Into<String>, flag: bool) -> Self {
        Self {
            name: name.into(),
            payload: Payload::Flag(flag),
        }
    }

    fn text(&self) -> &str {
        match &self.payload {
            Payload::Text(text) => text,
            _ => "",
        }
    }

    fn flag(&self) -> Option<bool> {
        match self.payload {
            Payload::Flag(flag) => Some(flag),
            _ => None,
        }
    }
}

/// Resolves one trigger into a typed action. Pure, no dispatcher state.
///
/// Missing text payloads fall back to the empty string and hit the store's
/// blank-name no-op; a checkbox trigger with no flag payload is invalid and
/// resolves to `Action::None`.
pub fn resolve(trigger: &Trigger) -> Action {
    match trigger.name.as_str() {
        "add-task" => return Action::Add(trigger.text().to_string()),
        "clear-completed" => return Action::ClearCompleted,
        "select_all" => {
            return match trigger.flag() {
                Some(completed) => Action::ToggleAll(completed),
                None => Action::None,
            };
        }
        _ => {}
    }

    let Some(captures) = VERB_INDEX_RE.captures(&trigger.name) else {
        return Action::None;
    };
    let Ok(index) = captures[2].parse::<usize>() else {
        return Action::None;
    };

    match &captures[1] {
        "update" => Action::Rename {
            index,
            name: trigger.text().to_string(),
        },
        "remove" => Action::Remove(index),
        "toggle" => match trigger.flag() {
            Some(completed) => Action::Toggle { index, completed },
            None => Action::None,
        },
        // `edit-<index>` changes render state only; `Dispatcher` tracks it.
        "edit" => Action::None,
        _ => Action::None,
    }
}

/// Stateful dispatcher: trigger resolution plus edit-mode tracking.
///
/// One instance per list/session, living as long as its `TaskStore`.
#[derive(Debug, Default)]
pub struct Dispatcher {
    editing: Option<usize>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves the trigger and updates edit-mode state.
    ///
    /// `edit-<index>` arms edit mode for that row; any other trigger
    /// (update, cancel, anything else) returns the display to non-editing.
    pub fn dispatch(&mut self, trigger: &Trigger) -> Action {
        self.editing = parse_edit_target(&trigger.name);
        resolve(trigger)
    }

    /// Row armed for editing by the last trigger, if any.
    pub fn editing_row(&self) -> Option<usize> {
        self.editing
    }

    /// Whether the row at `index` renders in edit mode this cycle.
    pub fn is_editing(&self, index: usize) -> bool {
        self.editing == Some(index)
    }
}

fn parse_edit_target(name: &str) -> Option<usize> {
    let captures = VERB_INDEX_RE.captures(name)?;
    if &captures[1] != "edit" {
        return None;
    }
    captures[2].parse::<usize>().ok()
}

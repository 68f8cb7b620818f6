//! Task list store.
//!
//! # Responsibility
//! - Own the ordered task list for one session.
//! - Apply typed actions and persist the full list after every mutation.
//! - Derive the filtered read-only view for rendering.
//!
//! # Invariants
//! - Task identity is positional: an index is only valid against the list
//!   state it was dispatched from. Callers must rebuild their view after
//!   every mutation and serialize actions per list instance.
//! - Every mutation writes the entire list back through the port before
//!   control returns; a failed write leaves in-memory state authoritative.
//! - Out-of-bounds indices and blank names are silent no-ops, never errors.

use crate::dispatch::Action;
use crate::model::task::{DerivedView, Filter, Task, TaskRow};
use crate::storage::{StorageResult, TaskStorage};
use log::{debug, info, warn};

/// One task list bound to a storage slot for the lifetime of a session.
pub struct TaskStore<S: TaskStorage> {
    tasks: Vec<Task>,
    storage: S,
}

impl<S: TaskStorage> TaskStore<S> {
    /// Loads the list from the port. Missing or malformed data starts empty.
    pub fn open(storage: S) -> Self {
        let tasks = storage.load();
        info!(
            "event=store_open module=store status=ok count={}",
            tasks.len()
        );
        Self { tasks, storage }
    }

    /// Applies one typed action by dispatching to the matching operation.
    ///
    /// This is the single mutation entry point: every write path runs
    /// through here or one of the operations it delegates to, so a mutation
    /// always implies a save.
    ///
    /// # Errors
    /// An `Err` means the save failed after the in-memory mutation was
    /// applied. Memory stays the source of truth for the current cycle, but
    /// the next load may not reflect this mutation.
    pub fn apply(&mut self, action: Action) -> StorageResult<()> {
        match action {
            Action::Add(name) => self.add(&name),
            Action::Rename { index, name } => self.rename(index, &name),
            Action::Toggle { index, completed } => self.toggle(index, completed),
            Action::ToggleAll(completed) => self.toggle_all(completed),
            Action::Remove(index) => self.remove(index),
            Action::ClearCompleted => self.clear_completed(),
            Action::None => Ok(()),
        }
    }

    /// Appends a pending task. A blank name is a defined no-op.
    pub fn add(&mut self, name: &str) -> StorageResult<()> {
        let Ok(task) = Task::new(name) else {
            debug!("event=task_add module=store status=ignored reason=blank_name");
            return Ok(());
        };
        self.tasks.push(task);
        info!(
            "event=task_add module=store status=ok count={}",
            self.tasks.len()
        );
        self.persist()
    }

    /// Renames the task at `index`. Blank names and out-of-bounds indices
    /// are no-ops.
    pub fn rename(&mut self, index: usize, new_name: &str) -> StorageResult<()> {
        if new_name.trim().is_empty() {
            debug!("event=task_rename module=store status=ignored reason=blank_name index={index}");
            return Ok(());
        }
        let Some(task) = self.tasks.get_mut(index) else {
            return self.ignore_out_of_bounds("task_rename", index);
        };
        task.name = new_name.to_string();
        self.persist()
    }

    /// Sets the completed flag of the task at `index`. Out-of-bounds is a
    /// no-op.
    pub fn toggle(&mut self, index: usize, completed: bool) -> StorageResult<()> {
        let Some(task) = self.tasks.get_mut(index) else {
            return self.ignore_out_of_bounds("task_toggle", index);
        };
        task.completed = completed;
        self.persist()
    }

    /// Sets the completed flag on every task in one pass.
    pub fn toggle_all(&mut self, completed: bool) -> StorageResult<()> {
        for task in &mut self.tasks {
            task.completed = completed;
        }
        self.persist()
    }

    /// Removes the task at `index`, shifting later indices down by one.
    /// Out-of-bounds is a no-op.
    pub fn remove(&mut self, index: usize) -> StorageResult<()> {
        if index >= self.tasks.len() {
            return self.ignore_out_of_bounds("task_remove", index);
        }
        self.tasks.remove(index);
        self.persist()
    }

    /// Removes every completed task, preserving the order of the rest.
    pub fn clear_completed(&mut self) -> StorageResult<()> {
        self.tasks.retain(|task| !task.completed);
        self.persist()
    }

    /// Derives the read-only projection for one render cycle. Pure: no side
    /// effects, no save. Counts run over the full list regardless of filter.
    pub fn view(&self, filter: Filter) -> DerivedView {
        let visible_tasks = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| filter.matches(task))
            .map(|(index, task)| TaskRow {
                index,
                task: task.clone(),
            })
            .collect();
        let active_count = self.tasks.iter().filter(|task| !task.completed).count();
        let completed_count = self.tasks.len() - active_count;

        DerivedView {
            visible_tasks,
            active_count,
            completed_count,
            all_completed: active_count == 0 && !self.tasks.is_empty(),
            show_footer: !self.tasks.is_empty(),
        }
    }

    /// Current list in display order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    fn ignore_out_of_bounds(&self, op: &str, index: usize) -> StorageResult<()> {
        // Expected race under positional identity: the row was removed
        // between render and dispatch.
        warn!(
            "event={op} module=store status=ignored reason=index_out_of_bounds index={index} count={}",
            self.tasks.len()
        );
        Ok(())
    }

    fn persist(&mut self) -> StorageResult<()> {
        if let Err(err) = self.storage.save(&self.tasks) {
            warn!("event=list_save module=store status=degraded error={err}");
            return Err(err);
        }
        Ok(())
    }
}

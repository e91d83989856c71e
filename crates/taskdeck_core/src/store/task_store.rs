//! Task store implementation.
//!
//! # Responsibility
//! - Hold the authoritative in-memory task collection in creation order.
//! - Expose the add/edit/delete/toggle/clear operations and read access
//!   for rendering.
//!
//! # Invariants
//! - All mutation passes through this type; collection invariants hold
//!   between operations.
//! - In-memory state stays authoritative when a write-through fails; the
//!   failure is logged, never propagated.

use crate::model::task::{Priority, Task, TaskId, TaskValidationError};
use crate::storage::TaskStorage;
use chrono::NaiveDate;
use log::error;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Semantic failure of a task store operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// An edit referenced an id absent from the collection.
    NotFound(TaskId),
    /// The supplied fields failed task validation.
    Validation(TaskValidationError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "task not found: {id}"),
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Validation(err) => Some(err),
        }
    }
}

impl From<TaskValidationError> for StoreError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Sole owner of the task collection, write-through persistent.
pub struct TaskStore<S: TaskStorage> {
    tasks: Vec<Task>,
    storage: S,
}

impl<S: TaskStorage> TaskStore<S> {
    /// Opens a store over the given adapter, loading the persisted
    /// collection once.
    ///
    /// A medium-level read failure is logged and recovered with an empty
    /// collection; it is not retried.
    pub fn open(storage: S) -> Self {
        let tasks = match storage.load_tasks() {
            Ok(tasks) => tasks,
            Err(err) => {
                error!("event=store_load module=store status=error error={err}");
                Vec::new()
            }
        };
        Self { tasks, storage }
    }

    /// Read access to the collection in creation order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Number of tasks in the collection.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Looks up a task by id.
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Creates a task and appends it to the collection.
    ///
    /// # Errors
    /// - `StoreError::Validation` when the trimmed title is empty.
    pub fn add(
        &mut self,
        title: &str,
        due: Option<NaiveDate>,
        priority: Priority,
    ) -> StoreResult<Task> {
        let task = Task::new(title, due, priority)?;
        self.tasks.push(task.clone());
        self.persist();
        Ok(task)
    }

    /// Overwrites title/due/priority of an existing task.
    ///
    /// `id`, `created_at` and `completed` are left untouched.
    ///
    /// # Errors
    /// - `StoreError::NotFound` when no task has the given id; the
    ///   collection is unchanged.
    /// - `StoreError::Validation` when the trimmed title is empty; the
    ///   collection is unchanged.
    pub fn edit(
        &mut self,
        id: TaskId,
        title: &str,
        due: Option<NaiveDate>,
        priority: Priority,
    ) -> StoreResult<Task> {
        let task = self
            .tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(StoreError::NotFound(id))?;

        task.set_title(title)?;
        task.due = due;
        task.priority = priority;
        let updated = task.clone();
        self.persist();
        Ok(updated)
    }

    /// Removes the task with the given id; no-op if absent.
    pub fn delete(&mut self, id: TaskId) {
        self.tasks.retain(|task| task.id != id);
        self.persist();
    }

    /// Flips the completion flag of the task with the given id; no-op if
    /// absent.
    pub fn toggle_complete(&mut self, id: TaskId) {
        if let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) {
            task.toggle_completed();
        }
        self.persist();
    }

    /// Removes every completed task; returns how many were removed.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|task| !task.completed);
        let removed = before - self.tasks.len();
        self.persist();
        removed
    }

    /// Empties the collection entirely.
    pub fn clear_all(&mut self) {
        self.tasks.clear();
        self.persist();
    }

    fn persist(&self) {
        if let Err(err) = self.storage.save_tasks(&self.tasks) {
            error!(
                "event=slot_save module=store status=error count={} error={err}",
                self.tasks.len()
            );
        }
    }
}

//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record and its lifecycle helpers.
//! - Produce the external wire shape of the persisted slot payload via
//!   serde derives.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `title` is stored trimmed and is never empty.
//! - `created_at` is assigned once at creation and never mutated.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a task.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = Uuid;

/// Urgency bucket for a task.
///
/// Ranked high before medium before low when ordering a view; the rank is
/// explicit rather than derived so the wire order of the variants can
/// never silently change the display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Do this first.
    High,
    /// Normal urgency.
    Medium,
    /// Whenever there is time.
    Low,
}

impl Priority {
    /// Display rank: high(0) < medium(1) < low(2).
    pub fn rank(self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }
}

/// Validation failure for task write paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Title was empty after trimming surrounding whitespace.
    EmptyTitle,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title must not be empty after trimming"),
        }
    }
}

impl Error for TaskValidationError {}

/// Canonical task record.
///
/// The serde field names are the persisted slot contract: `id`, `title`,
/// `due` (`YYYY-MM-DD` or null), `priority` (`low|medium|high`),
/// `completed`, `createdAt` (integer epoch milliseconds).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable unique ID, immutable after creation.
    pub id: TaskId,
    /// Trimmed, non-empty display title.
    pub title: String,
    /// Optional due date; `None` means "no due date".
    #[serde(default)]
    pub due: Option<NaiveDate>,
    /// Urgency bucket.
    pub priority: Priority,
    /// Completion flag, starts `false`.
    pub completed: bool,
    /// Unix epoch milliseconds at creation. Never mutated.
    #[serde(rename = "createdAt")]
    pub created_at: i64,
}

impl Task {
    /// Creates a new task with a fresh ID and the current timestamp.
    ///
    /// Trims the title and rejects an empty remainder; validation lives
    /// here rather than at the form boundary so every caller gets the
    /// same contract.
    ///
    /// # Errors
    /// - `TaskValidationError::EmptyTitle` when the trimmed title is empty.
    pub fn new(
        title: &str,
        due: Option<NaiveDate>,
        priority: Priority,
    ) -> Result<Self, TaskValidationError> {
        let title = trimmed_title(title)?;
        Ok(Self {
            id: Uuid::new_v4(),
            title,
            due,
            priority,
            completed: false,
            created_at: Utc::now().timestamp_millis(),
        })
    }

    /// Replaces the title, trimming and re-validating.
    ///
    /// # Errors
    /// - `TaskValidationError::EmptyTitle` when the trimmed title is empty.
    pub fn set_title(&mut self, title: &str) -> Result<(), TaskValidationError> {
        self.title = trimmed_title(title)?;
        Ok(())
    }

    /// Flips the completion flag. No other field changes.
    pub fn toggle_completed(&mut self) {
        self.completed = !self.completed;
    }
}

fn trimmed_title(title: &str) -> Result<String, TaskValidationError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(TaskValidationError::EmptyTitle);
    }
    Ok(trimmed.to_string())
}

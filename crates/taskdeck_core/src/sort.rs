//! Ordering engine for task views.
//!
//! # Responsibility
//! - Produce the display ordering for a snapshot of the task collection.
//! - Keep a single sorting contract regardless of which UI control picked
//!   the sort key.
//!
//! # Invariants
//! - `order` never mutates its input.
//! - Tie-breaks fully determine the result; equal keys fall back to
//!   ascending `created_at`, then to insertion order via stable sort.

use crate::model::task::Task;
use std::cmp::Ordering;

/// Selects the ordering rule applied for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Ascending creation time. The canonical tie-break for other keys.
    Created,
    /// High before medium before low, then creation time.
    Priority,
    /// Ascending due date; undated tasks after all dated ones.
    Due,
}

impl SortKey {
    /// Stable string form used by front ends and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Priority => "priority",
            Self::Due => "due",
        }
    }

    /// Parses the stable string form; `None` for anything else.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "created" => Some(Self::Created),
            "priority" => Some(Self::Priority),
            "due" => Some(Self::Due),
            _ => None,
        }
    }
}

/// Returns a new ordered view of `tasks` for the given key.
///
/// Works on a copied snapshot; the input collection is left untouched.
pub fn order(tasks: &[Task], key: SortKey) -> Vec<Task> {
    let mut view = tasks.to_vec();
    match key {
        SortKey::Created => view.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortKey::Priority => view.sort_by(|a, b| {
            a.priority
                .rank()
                .cmp(&b.priority.rank())
                .then(a.created_at.cmp(&b.created_at))
        }),
        SortKey::Due => view.sort_by(|a, b| match (a.due, b.due) {
            (Some(a_due), Some(b_due)) => {
                a_due.cmp(&b_due).then(a.created_at.cmp(&b.created_at))
            }
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.created_at.cmp(&b.created_at),
        }),
    }
    view
}

//! Core domain logic for taskdeck.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod sort;
pub mod storage;
pub mod store;
pub mod theme;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{Priority, Task, TaskId, TaskValidationError};
pub use sort::{order, SortKey};
pub use storage::{
    SqliteSlotStorage, StorageError, StorageResult, TaskStorage, TASKS_SLOT_KEY, THEME_SLOT_KEY,
};
pub use store::task_store::{StoreError, StoreResult, TaskStore};
pub use theme::Theme;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}

//! Persistence adapter for the task collection and theme slots.
//!
//! # Responsibility
//! - Define the storage contract the task store writes through.
//! - Keep SQL and serialization details inside the persistence boundary.
//!
//! # Invariants
//! - The persisted slot is a cache of in-memory truth, never the authority
//!   during a live session.
//! - `load_tasks` substitutes an empty collection for absent or malformed
//!   payloads instead of failing.

use crate::db::DbError;
use crate::model::task::Task;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod sqlite_slots;

pub use sqlite_slots::{SqliteSlotStorage, TASKS_SLOT_KEY, THEME_SLOT_KEY};

pub type StorageResult<T> = Result<T, StorageError>;

/// Medium-level failure of a slot read or write.
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    Serialize(serde_json::Error),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to serialize slot payload: {err}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Storage contract for the whole task collection as a single unit.
pub trait TaskStorage {
    /// Persists the full collection, replacing the previous payload.
    fn save_tasks(&self, tasks: &[Task]) -> StorageResult<()>;

    /// Loads the persisted collection.
    ///
    /// Returns an empty collection when the slot is absent or its payload
    /// is not a parsable sequence of task records; only medium-level
    /// failures surface as errors.
    fn load_tasks(&self) -> StorageResult<Vec<Task>>;
}

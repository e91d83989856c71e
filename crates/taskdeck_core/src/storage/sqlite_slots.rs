//! SQLite-backed slot storage.
//!
//! # Responsibility
//! - Round-trip the serialized task collection under its well-known key.
//! - Round-trip the theme preference under its own key on the same medium.
//!
//! # Invariants
//! - Each slot is written whole; no partial payloads.
//! - Malformed persisted payloads are logged and replaced with the safe
//!   default on read, never propagated.

use crate::model::task::Task;
use crate::storage::{StorageResult, TaskStorage};
use crate::theme::Theme;
use log::warn;
use rusqlite::{params, Connection, OptionalExtension};

/// Well-known key for the serialized task collection.
pub const TASKS_SLOT_KEY: &str = "taskdeck.tasks.v1";

/// Well-known key for the theme preference.
pub const THEME_SLOT_KEY: &str = "taskdeck.theme";

/// Slot storage over a borrowed SQLite connection.
///
/// The medium is shared; this type claims only its own keys and never
/// touches slots it does not own.
pub struct SqliteSlotStorage<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSlotStorage<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Persists the theme preference as its literal string form.
    pub fn save_theme(&self, theme: Theme) -> StorageResult<()> {
        self.write_slot(THEME_SLOT_KEY, theme.as_str())
    }

    /// Loads the theme preference.
    ///
    /// An absent slot or an unrecognized value falls back to the default
    /// (dark); only medium-level failures surface as errors.
    pub fn load_theme(&self) -> StorageResult<Theme> {
        let Some(raw) = self.read_slot(THEME_SLOT_KEY)? else {
            return Ok(Theme::default());
        };

        Ok(Theme::parse(&raw).unwrap_or_else(|| {
            warn!(
                "event=slot_load module=storage status=malformed key={THEME_SLOT_KEY} value={raw}"
            );
            Theme::default()
        }))
    }

    fn write_slot(&self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO slots (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }

    fn read_slot(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM slots WHERE key = ?1;", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }
}

impl TaskStorage for SqliteSlotStorage<'_> {
    fn save_tasks(&self, tasks: &[Task]) -> StorageResult<()> {
        let payload = serde_json::to_string(tasks)?;
        self.write_slot(TASKS_SLOT_KEY, &payload)
    }

    fn load_tasks(&self) -> StorageResult<Vec<Task>> {
        let Some(payload) = self.read_slot(TASKS_SLOT_KEY)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<Task>>(&payload) {
            Ok(tasks) => Ok(tasks),
            Err(err) => {
                warn!(
                    "event=slot_load module=storage status=malformed key={TASKS_SLOT_KEY} error={err}"
                );
                Ok(Vec::new())
            }
        }
    }
}

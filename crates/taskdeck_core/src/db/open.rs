//! Connection bootstrap utilities for the slot medium.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Configure connection behavior and trigger migrations before returning
//!   a usable connection.
//!
//! # Invariants
//! - Returned connections have migrations fully applied.

use super::migrations::apply_migrations;
use super::DbResult;
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;

/// Opens the slot database file and applies all pending migrations.
///
/// # Side effects
/// - Emits `db_open` logging events with mode and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    bootstrap(Connection::open(path), "file")
}

/// Opens an in-memory slot database and applies all pending migrations.
///
/// # Side effects
/// - Emits `db_open` logging events with mode and status.
pub fn open_db_in_memory() -> DbResult<Connection> {
    bootstrap(Connection::open_in_memory(), "memory")
}

fn bootstrap(opened: rusqlite::Result<Connection>, mode: &str) -> DbResult<Connection> {
    let mut conn = match opened {
        Ok(conn) => conn,
        Err(err) => {
            error!("event=db_open module=db status=error mode={mode} error={err}");
            return Err(err.into());
        }
    };

    conn.busy_timeout(Duration::from_secs(5))?;
    if let Err(err) = apply_migrations(&mut conn) {
        error!("event=db_open module=db status=error mode={mode} error={err}");
        return Err(err);
    }

    info!("event=db_open module=db status=ok mode={mode}");
    Ok(conn)
}

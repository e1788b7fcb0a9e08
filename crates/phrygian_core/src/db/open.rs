//! Connection bootstrap utilities for the SQLite catalog.
//!
//! # Responsibility
//! - Open existing, new, or in-memory catalog connections.
//! - Configure connection pragmas required by catalog queries.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON`.
//! - `open_catalog` never creates a database file as a side effect.

use super::migrations::{run_migration_script, INIT_SCRIPT};
use super::DbResult;
use log::{error, info};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use std::time::{Duration, Instant};

/// Opens an existing catalog database file.
///
/// Fails when the file does not exist, so a misconfigured path surfaces as an
/// error instead of an empty catalog.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub fn open_catalog(path: impl AsRef<Path>) -> DbResult<Connection> {
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
        | OpenFlags::SQLITE_OPEN_URI
        | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    open_with("file", || Connection::open_with_flags(path.as_ref(), flags))
}

/// Opens a catalog database file, creating it when missing.
///
/// Used by the migration utility, which is the only caller allowed to bring
/// a new catalog into existence.
pub fn create_catalog(path: impl AsRef<Path>) -> DbResult<Connection> {
    open_with("create", || Connection::open(path.as_ref()))
}

/// Opens an in-memory catalog with the bundled schema script applied.
///
/// # Side effects
/// - Performs connection bootstrap and runs the bundled schema.
/// - Emits `db_open` logging events with duration and status.
pub fn open_catalog_in_memory() -> DbResult<Connection> {
    let conn = open_with("memory", Connection::open_in_memory)?;
    run_migration_script(&conn, INIT_SCRIPT)?;
    Ok(conn)
}

fn open_with(
    mode: &'static str,
    open: impl FnOnce() -> rusqlite::Result<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode={mode}");

    let conn = match open() {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_open_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match bootstrap_connection(&conn) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode={} duration_ms={}",
                mode,
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_bootstrap_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err.into())
        }
    }
}

fn bootstrap_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_secs(5))?;
    Ok(())
}

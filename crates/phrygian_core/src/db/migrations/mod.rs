//! Forward-only schema script executor.
//!
//! # Responsibility
//! - Load the catalog schema script from disk.
//! - Execute it as a single batch against a catalog connection.
//!
//! # Invariants
//! - Errors reporting a pre-existing object ("already exists", "duplicate")
//!   are logged and tolerated; every other error is returned.
//! - Statements preceding a tolerated error stay applied.

use crate::db::{DbError, DbResult};
use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::Connection;
use std::path::Path;

/// Repository-relative location of the schema script.
pub const DEFAULT_SCRIPT_PATH: &str = "database/schema.sql";

/// Schema script bundled into the binary, used for in-memory catalogs.
pub const INIT_SCRIPT: &str = include_str!("../../../../../database/schema.sql");

static ALREADY_APPLIED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)already exists|duplicate").expect("valid already-applied regex")
});

/// Result of one migration run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// The whole script executed without error.
    Applied,
    /// Execution stopped on an object that already exists.
    AlreadyApplied { message: String },
}

/// Reads the script at `path` and executes it.
///
/// # Errors
/// - `DbError::ScriptRead` when the script cannot be read.
/// - `DbError::Sqlite` for any execution error that is not an
///   already-exists condition.
pub fn run_migration_file(conn: &Connection, path: impl AsRef<Path>) -> DbResult<MigrationOutcome> {
    let path = path.as_ref();
    let sql = std::fs::read_to_string(path).map_err(|source| DbError::ScriptRead {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        "event=migration_load module=db status=ok script={} bytes={}",
        path.display(),
        sql.len()
    );
    run_migration_script(conn, &sql)
}

/// Executes `sql` as one batch with foreign-key enforcement enabled.
pub fn run_migration_script(conn: &Connection, sql: &str) -> DbResult<MigrationOutcome> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;

    match conn.execute_batch(sql) {
        Ok(()) => {
            info!("event=migration_run module=db status=ok");
            Ok(MigrationOutcome::Applied)
        }
        Err(err) if is_already_applied(&err) => {
            warn!("event=migration_run module=db status=skipped reason=already_applied error={err}");
            Ok(MigrationOutcome::AlreadyApplied {
                message: err.to_string(),
            })
        }
        Err(err) => Err(err.into()),
    }
}

fn is_already_applied(err: &rusqlite::Error) -> bool {
    ALREADY_APPLIED_RE.is_match(&err.to_string())
}

//! SQLite catalog bootstrap, migration and diagnostics entry points.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the route catalog.
//! - Execute the forward-only schema script on operator request.
//! - Report per-table row counts for connection smoke tests.
//!
//! # Invariants
//! - Every returned connection has `foreign_keys=ON`.
//! - Request-path code never runs the schema script; only the admin
//!   utilities and in-memory test connections do.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod diagnostics;
pub mod migrations;
mod open;

pub use open::{create_catalog, open_catalog, open_catalog_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    ScriptRead {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::ScriptRead { path, source } => {
                write!(
                    f,
                    "failed to read migration script `{}`: {source}",
                    path.display()
                )
            }
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::ScriptRead { source, .. } => Some(source),
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

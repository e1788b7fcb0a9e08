//! Administrative catalog utilities.
//!
//! # Responsibility
//! - Apply the schema script to the catalog (`run-migration`).
//! - Smoke-test catalog connectivity and report row counts
//!   (`test-connection`).
//!
//! # Invariants
//! - Never invoked from a request path.
//! - Paths come from the environment only; the binaries take no flags.

use log::info;
use phrygian_core::db::diagnostics::{catalog_report, CatalogReport};
use phrygian_core::db::migrations::{run_migration_file, MigrationOutcome, DEFAULT_SCRIPT_PATH};
use phrygian_core::db::{create_catalog, open_catalog, DbResult};
use std::fmt::Write as _;
use std::path::PathBuf;

/// Repository-relative catalog location.
pub const DEFAULT_DB_PATH: &str = "database/phrygian.db";

const DB_PATH_ENV: &str = "PHRYGIAN_DB_PATH";
const SCRIPT_PATH_ENV: &str = "PHRYGIAN_MIGRATION_SCRIPT";
const LOG_LEVEL_ENV: &str = "PHRYGIAN_LOG_LEVEL";

/// File locations used by the admin utilities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminPaths {
    pub db_path: PathBuf,
    pub script_path: PathBuf,
}

impl AdminPaths {
    /// Reads overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        Self {
            db_path: non_empty(DB_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH)),
            script_path: non_empty(SCRIPT_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SCRIPT_PATH)),
        }
    }
}

/// Console log level for the utilities.
pub fn log_level_from_env() -> String {
    std::env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| "info".to_string())
}

/// Creates the catalog if needed and runs the schema script against it.
pub fn run_migration(paths: &AdminPaths) -> DbResult<MigrationOutcome> {
    info!(
        "event=migration_start module=cli status=start db_path={} script={}",
        paths.db_path.display(),
        paths.script_path.display()
    );
    let conn = create_catalog(&paths.db_path)?;
    run_migration_file(&conn, &paths.script_path)
}

/// Opens the existing catalog and collects table statistics.
pub fn test_connection(paths: &AdminPaths) -> DbResult<CatalogReport> {
    let conn = open_catalog(&paths.db_path)?;
    catalog_report(&conn)
}

/// Formats a report as console lines.
pub fn render_report(report: &CatalogReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Tables: {}", report.tables.join(", "));
    for (table, count) in &report.row_counts {
        let _ = writeln!(out, "  {table:<14} {count} row(s)");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{render_report, AdminPaths, DEFAULT_DB_PATH};
    use phrygian_core::db::diagnostics::CatalogReport;
    use std::path::PathBuf;

    #[test]
    fn defaults_apply_when_env_is_empty() {
        let paths = AdminPaths::from_lookup(|key| {
            (key == "PHRYGIAN_DB_PATH").then(|| "  ".to_string())
        });
        assert_eq!(paths.db_path, PathBuf::from(DEFAULT_DB_PATH));
        assert_eq!(paths.script_path, PathBuf::from("database/schema.sql"));
    }

    #[test]
    fn env_overrides_are_used() {
        let paths = AdminPaths::from_lookup(|key| match key {
            "PHRYGIAN_DB_PATH" => Some("/tmp/x.db".to_string()),
            "PHRYGIAN_MIGRATION_SCRIPT" => Some("/tmp/x.sql".to_string()),
            _ => None,
        });
        assert_eq!(paths.db_path, PathBuf::from("/tmp/x.db"));
        assert_eq!(paths.script_path, PathBuf::from("/tmp/x.sql"));
    }

    #[test]
    fn report_lists_every_count() {
        let report = CatalogReport {
            tables: vec!["routes".to_string(), "users".to_string()],
            row_counts: vec![("users", 2), ("routes", 3)],
        };
        let text = render_report(&report);
        assert!(text.starts_with("Tables: routes, users\n"));
        assert!(text.contains("users          2 row(s)"));
        assert!(text.contains("routes         3 row(s)"));
    }
}

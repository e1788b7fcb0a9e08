//! Catalog connection smoke-test helpers.
//!
//! # Responsibility
//! - Enumerate user-defined tables.
//! - Count rows in the tables the site depends on.

use super::DbResult;
use rusqlite::Connection;

/// Tables every healthy catalog must contain.
pub const EXPECTED_TABLES: [&str; 4] = ["users", "registrations", "routes", "analytics"];

/// Snapshot produced by [`catalog_report`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogReport {
    /// All user-defined tables, sorted by name.
    pub tables: Vec<String>,
    /// `(table, row_count)` for each entry of [`EXPECTED_TABLES`], in order.
    pub row_counts: Vec<(&'static str, i64)>,
}

/// Lists user tables and counts rows of the expected tables.
///
/// # Errors
/// - Any query failure, including a missing expected table.
pub fn catalog_report(conn: &Connection) -> DbResult<CatalogReport> {
    let tables = list_user_tables(conn)?;

    let mut row_counts = Vec::with_capacity(EXPECTED_TABLES.len());
    for table in EXPECTED_TABLES {
        // Table names come from a fixed list, never from input.
        let count: i64 =
            conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| row.get(0))?;
        row_counts.push((table, count));
    }

    Ok(CatalogReport { tables, row_counts })
}

/// Returns user-defined table names, excluding SQLite internals.
pub fn list_user_tables(conn: &Connection) -> DbResult<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT name
         FROM sqlite_master
         WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
         ORDER BY name ASC;",
    )?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(names)
}

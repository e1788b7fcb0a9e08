use phrygian_core::db::diagnostics::{catalog_report, list_user_tables, EXPECTED_TABLES};
use phrygian_core::db::migrations::{run_migration_file, MigrationOutcome, DEFAULT_SCRIPT_PATH};
use phrygian_core::db::{create_catalog, open_catalog, open_catalog_in_memory, DbError};
use rusqlite::Connection;
use std::path::{Path, PathBuf};

fn workspace_script() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../..")
        .join(DEFAULT_SCRIPT_PATH)
}

#[test]
fn bundled_script_runs_twice_against_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("phrygian.db");
    let conn = create_catalog(&path).unwrap();

    assert_eq!(
        run_migration_file(&conn, workspace_script()).unwrap(),
        MigrationOutcome::Applied
    );
    assert_eq!(
        run_migration_file(&conn, workspace_script()).unwrap(),
        MigrationOutcome::Applied
    );

    let report = catalog_report(&conn).unwrap();
    let routes = report
        .row_counts
        .iter()
        .find(|(table, _)| *table == "routes")
        .map(|(_, count)| *count);
    assert_eq!(routes, Some(3));
}

#[test]
fn already_existing_object_is_tolerated() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("strict.sql");
    std::fs::write(&script, "CREATE TABLE trail_notes (id INTEGER PRIMARY KEY);").unwrap();
    let conn = Connection::open_in_memory().unwrap();

    run_migration_file(&conn, &script).unwrap();
    let outcome = run_migration_file(&conn, &script).unwrap();
    assert!(matches!(outcome, MigrationOutcome::AlreadyApplied { .. }));
}

#[test]
fn missing_script_is_script_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let conn = Connection::open_in_memory().unwrap();
    let err = run_migration_file(&conn, dir.path().join("absent.sql")).unwrap_err();
    assert!(matches!(err, DbError::ScriptRead { .. }));
}

#[test]
fn other_errors_abort_the_migration() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("broken.sql");
    std::fs::write(&script, "INSERT INTO nowhere VALUES (1);").unwrap();
    let conn = Connection::open_in_memory().unwrap();

    let err = run_migration_file(&conn, &script).unwrap_err();
    assert!(matches!(err, DbError::Sqlite(_)));
}

#[test]
fn report_lists_all_expected_tables() {
    let conn = open_catalog_in_memory().unwrap();
    let tables = list_user_tables(&conn).unwrap();
    for expected in EXPECTED_TABLES {
        assert!(tables.iter().any(|name| name == expected), "missing {expected}");
    }

    let report = catalog_report(&conn).unwrap();
    assert_eq!(
        report.row_counts,
        vec![("users", 0), ("registrations", 0), ("routes", 3), ("analytics", 0)]
    );
}

#[test]
fn report_on_empty_catalog_fails() {
    let conn = Connection::open_in_memory().unwrap();
    assert!(catalog_report(&conn).is_err());
}

#[test]
fn open_catalog_rejects_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.db");
    assert!(open_catalog(&path).is_err());
    assert!(!path.exists());
}

#[test]
fn foreign_keys_are_enforced() {
    let conn = open_catalog_in_memory().unwrap();
    let err = conn
        .execute(
            "INSERT INTO registrations (full_name, email, route_id) VALUES ('A', 'a@x', 'no-such');",
            [],
        )
        .unwrap_err();
    assert!(err.to_string().contains("FOREIGN KEY"));
}

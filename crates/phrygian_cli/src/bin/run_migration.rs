//! `run-migration`: applies the catalog schema script.
//!
//! Exits 0 when the script ran or hit an already-existing object, 1 otherwise.

use phrygian_cli::{log_level_from_env, run_migration, AdminPaths};
use phrygian_core::db::migrations::MigrationOutcome;
use phrygian_core::init_console_logging;
use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(err) = init_console_logging(&log_level_from_env()) {
        eprintln!("run-migration: {err}");
        return ExitCode::FAILURE;
    }

    let paths = AdminPaths::from_env();
    println!(
        "Running migration {} against {}",
        paths.script_path.display(),
        paths.db_path.display()
    );

    match run_migration(&paths) {
        Ok(MigrationOutcome::Applied) => {
            println!("Migration completed.");
            ExitCode::SUCCESS
        }
        Ok(MigrationOutcome::AlreadyApplied { message }) => {
            println!("Migration skipped, objects already exist: {message}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Migration failed: {err}");
            ExitCode::FAILURE
        }
    }
}

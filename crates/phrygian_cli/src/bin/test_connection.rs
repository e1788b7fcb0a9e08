//! `test-connection`: opens the catalog and prints table row counts.

use phrygian_cli::{log_level_from_env, render_report, test_connection, AdminPaths};
use phrygian_core::init_console_logging;
use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(err) = init_console_logging(&log_level_from_env()) {
        eprintln!("test-connection: {err}");
        return ExitCode::FAILURE;
    }

    let paths = AdminPaths::from_env();
    println!("Connecting to {}", paths.db_path.display());

    match test_connection(&paths) {
        Ok(report) => {
            print!("{}", render_report(&report));
            println!("Connection OK.");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Connection test failed: {err}");
            ExitCode::FAILURE
        }
    }
}

//! `phrygian-server`: serves the content, gallery and route API.

use clap::Parser;
use log::{error, info};
use phrygian_core::{init_console_logging, init_logging};
use phrygian_server::{serve, AppState, ServerConfig};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let config = ServerConfig::parse();

    if let Err(err) = start_logging(&config) {
        eprintln!("phrygian-server: {err}");
        return ExitCode::FAILURE;
    }

    info!(
        "event=server_config module=server status=ok bind={} content_path={} db_path={}",
        config.bind,
        config.content_path.display(),
        config.db_path.display()
    );

    let state = AppState::from_paths(&config.content_path, &config.db_path);
    match serve(config.bind, state).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=server_run module=server status=error error={err}");
            eprintln!("phrygian-server: {err}");
            ExitCode::FAILURE
        }
    }
}

fn start_logging(config: &ServerConfig) -> Result<(), String> {
    let level = config.effective_log_level();
    let cwd = std::env::current_dir()
        .map_err(|err| format!("cannot resolve working directory: {err}"))?;

    match config.absolute_log_dir(&cwd) {
        Some(dir) => init_logging(level, &dir),
        None => init_console_logging(level),
    }
}

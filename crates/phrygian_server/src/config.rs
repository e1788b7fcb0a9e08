//! Server configuration from flags and environment.

use clap::Parser;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Runtime settings for `phrygian-server`.
#[derive(Debug, Clone, Parser)]
#[command(name = "phrygian-server", version, about = "Phrygian Way content and route API")]
pub struct ServerConfig {
    /// Socket address to listen on.
    #[arg(long, env = "PHRYGIAN_BIND", default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,

    /// JSON document holding hero, intro and gallery content.
    #[arg(long, env = "PHRYGIAN_CONTENT_PATH", default_value = "data/content.json")]
    pub content_path: PathBuf,

    /// SQLite route catalog.
    #[arg(long, env = "PHRYGIAN_DB_PATH", default_value = "database/phrygian.db")]
    pub db_path: PathBuf,

    /// trace|debug|info|warn|error; defaults by build mode.
    #[arg(long, env = "PHRYGIAN_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Directory for rolling log files; logs go to stderr when unset.
    #[arg(long, env = "PHRYGIAN_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

impl ServerConfig {
    pub fn effective_log_level(&self) -> &str {
        self.log_level
            .as_deref()
            .unwrap_or(phrygian_core::default_log_level())
    }

    /// Log directory resolved against `cwd` when relative.
    pub fn absolute_log_dir(&self, cwd: &Path) -> Option<PathBuf> {
        self.log_dir.as_ref().map(|dir| {
            if dir.is_absolute() {
                dir.clone()
            } else {
                cwd.join(dir)
            }
        })
    }
}

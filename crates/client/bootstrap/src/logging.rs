//! Tracing setup for client binaries.
//!
//! Logs go to a per-session file (always) and to stderr. The message log of
//! the game (target `game_log`) shows up in both.
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::AppConfig;

/// Keeps the file writer alive. Drop it last, after the session ends.
#[must_use = "dropping the guard stops the file writer"]
pub struct LoggingGuard {
    _worker: WorkerGuard,
    pub session_id: String,
    pub log_file: PathBuf,
}

/// Installs the global subscriber.
pub fn setup_logging(config: &AppConfig) -> Result<LoggingGuard> {
    let session_id = config.session_id.clone().unwrap_or_else(default_session_id);
    let base_dir = config.log_dir.clone().unwrap_or_else(default_log_dir);
    let session_dir = prepare_session_dir(&base_dir, &session_id)?;

    let file_appender = tracing_appender::rolling::never(&session_dir, "client.log");
    let (non_blocking_file, worker) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .context("a global tracing subscriber is already installed")?;

    let log_file = session_dir.join("client.log");
    tracing::info!(session = %session_id, "logging initialized");
    tracing::info!("log file: {}", log_file.display());

    Ok(LoggingGuard {
        _worker: worker,
        session_id,
        log_file,
    })
}

/// Platform cache directory for logs.
///
/// - macOS: `~/Library/Caches/dungeon/logs`
/// - Linux: `~/.cache/dungeon/logs` (or `$XDG_CACHE_HOME/dungeon/logs`)
/// - Windows: `%LOCALAPPDATA%\dungeon\logs`
/// - Fallback: `/tmp/dungeon/logs`
pub fn default_log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "dungeon")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/dungeon"))
        .join("logs")
}

pub fn default_session_id() -> String {
    chrono::Utc::now().format("session_%Y%m%d_%H%M%S").to_string()
}

fn prepare_session_dir(base: &Path, session_id: &str) -> Result<PathBuf> {
    let dir = base.join(session_id);
    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;
    Ok(dir)
}

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use directories::BaseDirs;
use providers::config::APP_DIR;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

pub fn log_dir() -> PathBuf {
    match BaseDirs::new() {
        Some(base) => base.data_dir().join(APP_DIR),
        None => std::env::temp_dir().join(APP_DIR),
    }
}

/// Logs go to a file so stdout stays the conversation. Keep the guard alive
/// until exit or buffered lines are lost.
pub fn init() -> Result<WorkerGuard> {
    let dir = log_dir();
    fs::create_dir_all(&dir).with_context(|| format!("create log dir: {}", dir.display()))?;
    let appender = tracing_appender::rolling::never(&dir, "tutor.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .init();
    Ok(guard)
}

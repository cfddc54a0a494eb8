use std::{
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LoggingConfig;

const LOG_FILE_PREFIX: &str = "sentinel.log";

static INIT: OnceCell<PathBuf> = OnceCell::new();
static GUARD: OnceCell<tracing_appender::non_blocking::WorkerGuard> = OnceCell::new();

/// Installs console and daily-rolling file output. Later calls are no-ops
/// and return the directory chosen by the first call.
pub fn init_tracing(config: &LoggingConfig) -> Result<PathBuf> {
    let logs_dir = INIT.get_or_try_init::<_, anyhow::Error>(|| {
        let logs_dir = ensure_logs_dir(&config.logs_dir)?;

        let env_filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&config.level))
            .unwrap_or_else(|_| EnvFilter::new("info"));

        let file_appender = tracing_appender::rolling::daily(&logs_dir, LOG_FILE_PREFIX);
        let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
        let _ = GUARD.set(guard);

        let console_layer = fmt::layer()
            .with_writer(io::stdout)
            .with_target(true)
            .with_ansi(true);

        let file_layer = fmt::layer()
            .with_writer(file_writer)
            .with_target(true)
            .with_ansi(false);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .with(file_layer)
            .try_init()
            .context("a global tracing subscriber is already installed")?;

        tracing::info!(logs = %logs_dir.display(), level = %config.level, "tracing initialized");
        Ok(logs_dir)
    })?;
    Ok(logs_dir.clone())
}

fn ensure_logs_dir(path: &str) -> Result<PathBuf> {
    let dir = Path::new(path);
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;
    Ok(dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf()))
}

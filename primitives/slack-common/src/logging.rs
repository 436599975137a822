//! Tracing subscriber setup.
//!
//! Always logs to stdout. When a log file is configured, a second layer
//! writes plain text to a daily-rolling file beside it.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _};

use crate::{Error, Result, Settings};

/// Rolled log files kept on disk.
const MAX_LOG_FILES: usize = 30;

/// Keeps the non-blocking file writer alive. Hold it until the process exits.
#[must_use = "dropping the guard stops file logging"]
pub struct LoggingGuard {
    _file: Option<WorkerGuard>,
}

/// Installs the global tracing subscriber for the configured level.
///
/// `RUST_LOG`, when set, takes precedence over the configured level.
pub fn init_logging(settings: &Settings) -> Result<LoggingGuard> {
    let level = settings.log_level;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_directive()));

    let stdout_layer = fmt::layer().with_target(true);

    let (file_layer, guard) = match &settings.log_file {
        Some(path) => {
            let (dir, prefix) = split_log_path(path);
            fs::create_dir_all(&dir)?;

            let appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix(prefix)
                .max_log_files(MAX_LOG_FILES)
                .build(&dir)
                .map_err(|e| Error::Config(format!("cannot open log file in {}: {e}", dir.display())))?;
            let (writer, guard) = tracing_appender::non_blocking(appender);

            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| Error::Config(format!("logging already initialised: {e}")))?;

    tracing::info!(level = %level, "Logger configured");

    Ok(LoggingGuard { _file: guard })
}

/// Splits a log file path into its directory and file-name prefix.
fn split_log_path(path: &Path) -> (PathBuf, String) {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let prefix = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "slack-source.log".to_string());
    (dir, prefix)
}

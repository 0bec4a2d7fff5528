//! Tracing output for the soundboard: stdout plus a daily file in the
//! `.soundpad/logs` folder.
//!
//! The level and the number of retained files come from the `[logging]`
//! section of `config.toml`; `RUST_LOG` takes precedence over the level.

use std::{path::Path, sync::OnceLock};

use time::{UtcOffset, format_description::BorrowedFormatItem, macros::format_description};
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{InitError, RollingFileAppender, Rotation},
};
use tracing_subscriber::{EnvFilter, Registry, filter::ParseError, fmt, prelude::*};

use crate::app_dirs::{AppDirError, AppPaths};
use crate::config::LoggingSettings;

const LOG_FILE_PREFIX: &str = "soundpad";
const LOG_FILE_SUFFIX: &str = "log";
const TIMESTAMP: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error(transparent)]
    Dirs(#[from] AppDirError),
    #[error("Invalid log level {level:?}: {source}")]
    Level { level: String, source: ParseError },
    #[error("Failed to open log file: {0}")]
    Appender(#[from] InitError),
    #[error("Failed to install global tracing subscriber: {0}")]
    SetGlobal(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Install the global subscriber; later calls are no-ops.
///
/// Errors leave the process without logging but are safe to ignore.
pub fn init(paths: &AppPaths, settings: &LoggingSettings) -> Result<(), LoggingError> {
    if LOG_GUARD.get().is_some() {
        return Ok(());
    }
    let filter = level_filter(&settings.level)?;
    let logs = paths.logs_dir()?;
    let (file_writer, guard) =
        tracing_appender::non_blocking(daily_appender(&logs, settings.max_files)?);

    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    let timer = fmt::time::OffsetTime::new(offset, TIMESTAMP);
    let subscriber = Registry::default()
        .with(filter)
        .with(
            fmt::layer()
                .with_timer(timer.clone())
                .with_writer(std::io::stdout),
        )
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_timer(timer)
                .with_writer(file_writer),
        );
    tracing::subscriber::set_global_default(subscriber)?;
    let _ = LOG_GUARD.set(guard);

    tracing::info!(
        "Logging at {} to {} (keeping {} files)",
        settings.level,
        logs.display(),
        settings.max_files
    );
    Ok(())
}

fn level_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(level).map_err(|source| LoggingError::Level {
        level: level.to_string(),
        source,
    })
}

/// One `soundpad.<date>.log` per day; older days beyond `max_files` are pruned.
fn daily_appender(dir: &Path, max_files: usize) -> Result<RollingFileAppender, InitError> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix(LOG_FILE_SUFFIX)
        .max_log_files(max_files.max(1))
        .build(dir)
}

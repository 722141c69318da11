//! Logging infrastructure for Health Guardian
//!
//! Logs go to `~/.local/state/health-guardian/` following XDG standards, one
//! file per day named `health-guardian.log.YYYY-MM-DD`. The TUI owns stdout,
//! so nothing is ever logged to the terminal.

use crate::config::{Config, LoggingConfig};
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Prefix of every log file; the appender adds the date suffix.
pub const LOG_FILE_PREFIX: &str = "health-guardian.log";

/// Initialize the logging system in the XDG state directory.
///
/// Sets up tracing with:
/// - Daily rotation, keeping `max_files` files
/// - Configurable log level via config or RUST_LOG env var
pub fn init(config: &LoggingConfig) -> Result<LoggingGuard> {
    init_in(&Config::state_dir(), config)
}

/// Initialize the logging system writing into `log_dir`.
pub fn init_in(log_dir: &Path, config: &LoggingConfig) -> Result<LoggingGuard> {
    let file_appender = file_appender(log_dir, config)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .map_err(|e| Error::Logging(format!("failed to install subscriber: {e}")))?;

    tracing::info!(
        log_dir = %log_dir.display(),
        level = %config.level,
        "Logging initialized"
    );

    Ok(LoggingGuard {
        log_dir: log_dir.to_path_buf(),
        _guard: guard,
    })
}

/// Daily-rolling appender in `log_dir`, creating the directory if needed.
fn file_appender(log_dir: &Path, config: &LoggingConfig) -> Result<RollingFileAppender> {
    std::fs::create_dir_all(log_dir)?;

    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .max_log_files(config.max_files.max(1))
        .build(log_dir)
        .map_err(|e| Error::Logging(format!("failed to create log file appender: {e}")))
}

/// Initialize logging for tests (logs to the test writer)
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .with_span_events(FmtSpan::CLOSE)
        .try_init();
}

/// Keeps the non-blocking writer alive; pending lines are flushed on drop.
pub struct LoggingGuard {
    log_dir: PathBuf,
    _guard: tracing_appender::non_blocking::WorkerGuard,
}

impl LoggingGuard {
    /// Directory holding the log files.
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appender_creates_dated_file() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("nested/logs");

        let _appender = file_appender(&log_dir, &LoggingConfig::default()).unwrap();

        let names: Vec<String> = std::fs::read_dir(&log_dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names.len(), 1);
        assert!(names[0].starts_with("health-guardian.log."), "{names:?}");
    }
}

//! Thin logger facade over `tracing` used by the CLI commands.
use std::path::PathBuf;

use super::subscriber::STAGE_TARGET;
use super::utils::log_file_path;

/// Console and file logger for one command invocation.
///
/// All messages are written to a persistent log file at
/// `$XDG_CACHE_HOME/dbushelp/<command>.log` (default
/// `~/.cache/dbushelp/<command>.log`) by the subscriber installed with
/// [`init_subscriber`](super::init_subscriber), regardless of the verbose
/// flag.
#[derive(Debug)]
pub struct Logger {
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a new logger.
    ///
    /// Stores the log file path for display; the file itself is created by
    /// [`init_subscriber`](super::init_subscriber).
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self {
            log_file: log_file_path(command),
        }
    }

    /// Return the log file path, if available.
    #[must_use]
    pub const fn log_path(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (suppressed on console unless verbose; always
    /// written to the log file).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }
}

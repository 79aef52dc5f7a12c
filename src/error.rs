//! Error types shared across the service.

use std::path::PathBuf;

/// Failures inside the logging subsystem.
///
/// These never reach callers of the [`Logger`](crate::logging::Logger)
/// facade; they are surfaced by sinks and swallowed (and counted) there.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("failed to create log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open log file {path}: {source}")]
    OpenFile {
        path: PathBuf,
        #[source]
        source: tracing_appender::rolling::InitError,
    },

    #[error("failed to write log output: {0}")]
    Write(#[from] std::io::Error),

    #[error("log writer lock poisoned")]
    Poisoned,
}

/// Failures while running the HTTP server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

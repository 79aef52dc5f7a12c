//! Logger facade.
//!
//! # Responsibilities
//! - Build records stamped with service, environment and time
//! - Redact context and error detail
//! - Fan each record out to every sink whose threshold accepts it
//!
//! # Design Decisions
//! - Explicitly constructed and passed to consumers; no global instance
//! - Clones share the same sinks (cheap `Arc` clone)
//! - No method panics or returns an error; sink write failures are counted

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::config::LoggerConfiguration;
use crate::error::LoggingError;
use crate::logging::level::Level;
use crate::logging::record::{context_from_value, Context, ErrorDetail, LogRecord};
use crate::logging::redaction::Redactor;
use crate::logging::sink::{build_sinks, Sink};

struct LoggerInner {
    service: String,
    environment: String,
    redactor: Option<Redactor>,
    sinks: Vec<Sink>,
    write_failures: AtomicU64,
}

/// Handle to the process logger.
#[derive(Clone)]
pub struct Logger {
    inner: Arc<LoggerInner>,
    bindings: Context,
}

impl Logger {
    /// Create a logger and its sinks from a resolved configuration.
    ///
    /// A file sink that cannot be opened is skipped; the failure is logged
    /// to whatever sinks remain.
    pub fn new(config: &LoggerConfiguration) -> Self {
        let (sinks, errors) = build_sinks(config);
        Self::from_parts(config, sinks, errors)
    }

    /// Create a logger over `sinks` and report each sink that failed to open
    /// as an `error` record on them.
    pub fn from_parts(
        config: &LoggerConfiguration,
        sinks: Vec<Sink>,
        errors: Vec<LoggingError>,
    ) -> Self {
        let logger = Self::with_sinks(config, sinks);

        for e in errors {
            logger.error(
                "Failed to initialize log sink",
                None,
                Some(&ErrorDetail::from_error(&e)),
            );
        }

        logger
    }

    /// Create a logger over caller-provided sinks.
    pub fn with_sinks(config: &LoggerConfiguration, sinks: Vec<Sink>) -> Self {
        Self {
            inner: Arc::new(LoggerInner {
                service: config.service_name.clone(),
                environment: config.environment.to_string(),
                redactor: config.redact.then(Redactor::denylist),
                sinks,
                write_failures: AtomicU64::new(0),
            }),
            bindings: Context::new(),
        }
    }

    /// Child logger whose records carry `bindings` in their context.
    ///
    /// Fields passed at the call site win over bound fields of the same name.
    pub fn with_context(&self, bindings: Context) -> Self {
        let mut merged = self.bindings.clone();
        merged.extend(bindings);
        Self {
            inner: Arc::clone(&self.inner),
            bindings: merged,
        }
    }

    /// Service name stamped on every record.
    pub fn service(&self) -> &str {
        &self.inner.service
    }

    pub fn environment(&self) -> &str {
        &self.inner.environment
    }

    /// Whether any sink would accept a record at `level`.
    pub fn enabled(&self, level: Level) -> bool {
        self.inner.sinks.iter().any(|s| s.accepts(level))
    }

    /// Number of sink writes that have failed since creation.
    pub fn write_failures(&self) -> u64 {
        self.inner.write_failures.load(Ordering::Relaxed)
    }

    /// Log at `trace`.
    pub fn trace(&self, message: &str, context: Option<Value>) {
        self.log(Level::Trace, message, context, None);
    }

    /// Log at `debug`.
    pub fn debug(&self, message: &str, context: Option<Value>) {
        self.log(Level::Debug, message, context, None);
    }

    /// Log at `info`.
    pub fn info(&self, message: &str, context: Option<Value>) {
        self.log(Level::Info, message, context, None);
    }

    /// Log at `warn`.
    pub fn warn(&self, message: &str, context: Option<Value>) {
        self.log(Level::Warn, message, context, None);
    }

    /// Log at `error`, optionally with a structured error.
    pub fn error(&self, message: &str, context: Option<Value>, error: Option<&ErrorDetail>) {
        self.log(Level::Error, message, context, error);
    }

    /// Log at `fatal`. The process is not terminated.
    pub fn fatal(&self, message: &str, context: Option<Value>, error: Option<&ErrorDetail>) {
        self.log(Level::Fatal, message, context, error);
    }

    /// Build a record at `level` and write it to every sink that accepts it.
    pub fn log(
        &self,
        level: Level,
        message: &str,
        context: Option<Value>,
        error: Option<&ErrorDetail>,
    ) {
        if !self.enabled(level) {
            return;
        }

        let line = self.render(Utc::now(), level, message, context, error);
        for sink in self.inner.sinks.iter().filter(|s| s.accepts(level)) {
            if sink.write_line(&line).is_err() {
                self.inner.write_failures.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    fn render(
        &self,
        at: DateTime<Utc>,
        level: Level,
        message: &str,
        context: Option<Value>,
        error: Option<&ErrorDetail>,
    ) -> String {
        let mut record = LogRecord::new(
            at,
            level,
            &self.inner.service,
            &self.inner.environment,
            message,
        );
        record.context = self.merge_context(context);
        record.error = error.cloned();

        let Some(redactor) = &self.inner.redactor else {
            return record.to_line();
        };

        let mut value = match serde_json::to_value(&record) {
            Ok(value) => value,
            Err(_) => return record.to_line(),
        };
        for field in ["context", "error"] {
            if let Some(subtree) = value.get_mut(field) {
                redactor.redact(subtree);
            }
        }
        serde_json::to_string(&value).unwrap_or_else(|_| message.to_string())
    }

    fn merge_context(&self, context: Option<Value>) -> Option<Context> {
        let call_site = context.and_then(context_from_value);
        if self.bindings.is_empty() {
            return call_site;
        }

        let mut merged = self.bindings.clone();
        if let Some(fields) = call_site {
            merged.extend(fields);
        }
        Some(merged)
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("service", &self.inner.service)
            .field("environment", &self.inner.environment)
            .field("sinks", &self.inner.sinks)
            .field("bindings", &self.bindings)
            .finish()
    }
}

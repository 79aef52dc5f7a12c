//! Startup orchestration.
//!
//! # Responsibilities
//! - Resolve logger configuration once from the environment
//! - Build the process logger handed to every subsystem
//! - Prune expired log files before traffic starts

use serde_json::json;

use crate::config::{LoggerConfiguration, LoggerOverrides};
use crate::logging::{prune_expired_logs, Logger, PruneReport};

/// Everything produced by [`init_logging`].
#[derive(Debug, Clone)]
pub struct LoggingRuntime {
    pub logger: Logger,
    pub pruned: PruneReport,
}

/// Resolve configuration from `overrides`, build the logger and run the
/// retention pruner once.
pub fn init_logging(overrides: &LoggerOverrides) -> LoggingRuntime {
    let config = LoggerConfiguration::resolve(overrides.environment(), overrides);
    let logger = Logger::new(&config);

    let pruned = prune_expired_logs(&config.log_dir, &config.service_name, config.retention_days);

    logger.info(
        "Logger initialized",
        Some(json!({
            "level": config.level,
            "transport": config.transports.to_string(),
            "retentionDays": config.retention_days,
            "logDir": config.log_dir.display().to_string(),
            "prunedFiles": pruned.removed,
        })),
    );

    LoggingRuntime {
        logger,
        pruned,
    }
}

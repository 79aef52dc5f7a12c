//! Configuration schema definitions.
//!
//! This module defines the resolved logger configuration and the
//! environment-specific defaults it is built from.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::logging::Level;

/// Service name used when `LOG_SERVICE_NAME` is unset.
pub const DEFAULT_SERVICE_NAME: &str = "user-service";

/// Log directory used when `LOG_DIR` is unset.
pub const DEFAULT_LOG_DIR: &str = "./logs";

/// Deployment environment, selected by `NODE_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Local,
    Qa,
    Staging,
    Production,
}

impl Environment {
    /// Parse an environment name; anything unrecognized is `Development`.
    pub fn parse_or_default(value: Option<&str>) -> Self {
        value
            .and_then(|v| v.parse().ok())
            .unwrap_or_default()
    }

    /// Lower-case name, as written in `NODE_ENV` and on every record.
    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Local => "local",
            Environment::Qa => "qa",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }

    /// Defaults applied before overrides.
    pub fn defaults(self) -> EnvironmentDefaults {
        match self {
            Environment::Development | Environment::Local => EnvironmentDefaults {
                level: Level::Debug,
                transports: Transports::CONSOLE,
                retention_days: 3,
            },
            Environment::Qa | Environment::Staging => EnvironmentDefaults {
                level: Level::Info,
                transports: Transports::BOTH,
                retention_days: 7,
            },
            Environment::Production => EnvironmentDefaults {
                level: Level::Error,
                transports: Transports::FILE,
                retention_days: 14,
            },
        }
    }
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" => Ok(Environment::Development),
            "local" => Ok(Environment::Local),
            "qa" => Ok(Environment::Qa),
            "staging" => Ok(Environment::Staging),
            "production" => Ok(Environment::Production),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-environment default triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvironmentDefaults {
    pub level: Level,
    pub transports: Transports,
    pub retention_days: i64,
}

/// Which sinks are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Transports {
    pub console: bool,
    pub file: bool,
}

impl Transports {
    pub const NONE: Transports = Transports { console: false, file: false };
    pub const CONSOLE: Transports = Transports { console: true, file: false };
    pub const FILE: Transports = Transports { console: false, file: true };
    pub const BOTH: Transports = Transports { console: true, file: true };

    /// Parse a comma-separated selector such as `console,file` or `both`.
    ///
    /// Unknown tokens are ignored, so a selector naming nothing valid
    /// enables no sink at all.
    pub fn parse(selector: &str) -> Self {
        let mut transports = Transports::NONE;
        for token in selector.split(',') {
            match token.trim().to_ascii_lowercase().as_str() {
                "console" => transports.console = true,
                "file" => transports.file = true,
                "both" => transports = Transports::BOTH,
                _ => {}
            }
        }
        transports
    }

    pub fn is_empty(&self) -> bool {
        !self.console && !self.file
    }
}

impl fmt::Display for Transports {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.console, self.file) {
            (true, true) => f.write_str("console,file"),
            (true, false) => f.write_str("console"),
            (false, true) => f.write_str("file"),
            (false, false) => f.write_str("none"),
        }
    }
}

/// Resolved logger configuration.
///
/// Computed once at process start and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfiguration {
    /// Minimum level every sink accepts.
    pub level: Level,

    /// Enabled sinks.
    pub transports: Transports,

    /// Embedded in every record and in log file names.
    pub service_name: String,

    pub environment: Environment,

    /// Days of log files to keep. Zero or less disables pruning.
    pub retention_days: i64,

    /// Always true for resolved configurations.
    pub redact: bool,

    /// Directory holding the daily log files.
    pub log_dir: PathBuf,
}

impl LoggerConfiguration {
    /// Configuration for `environment` with no overrides.
    pub fn for_environment(environment: Environment) -> Self {
        let defaults = environment.defaults();
        Self {
            level: defaults.level,
            transports: defaults.transports,
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            environment,
            retention_days: defaults.retention_days,
            redact: true,
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
        }
    }
}

impl Default for LoggerConfiguration {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parsing() {
        assert_eq!(Environment::parse_or_default(Some("PRODUCTION ")), Environment::Production);
        assert_eq!(Environment::parse_or_default(Some("qa")), Environment::Qa);
        assert_eq!(Environment::parse_or_default(Some("test")), Environment::Development);
        assert_eq!(Environment::parse_or_default(None), Environment::Development);
    }

    #[test]
    fn test_transport_parsing() {
        assert_eq!(Transports::parse("console"), Transports::CONSOLE);
        assert_eq!(Transports::parse("file"), Transports::FILE);
        assert_eq!(Transports::parse("console,file"), Transports::BOTH);
        assert_eq!(Transports::parse(" File , CONSOLE "), Transports::BOTH);
        assert_eq!(Transports::parse("both"), Transports::BOTH);
        assert_eq!(Transports::parse("syslog"), Transports::NONE);
        assert!(Transports::parse("").is_empty());
    }
}

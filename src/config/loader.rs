//! Configuration loading from environment variables.

use std::path::PathBuf;

use crate::config::schema::{Environment, LoggerConfiguration, Transports};
use crate::config::validation::{sanitize_level, sanitize_retention_days};

pub const ENV_ENVIRONMENT: &str = "NODE_ENV";
pub const ENV_LEVEL: &str = "LOG_LEVEL";
pub const ENV_TRANSPORT: &str = "LOG_TRANSPORT";
pub const ENV_ROTATION_DAYS: &str = "LOG_ROTATION_DAYS";
pub const ENV_SERVICE_NAME: &str = "LOG_SERVICE_NAME";
pub const ENV_LOG_DIR: &str = "LOG_DIR";

/// Raw operator-supplied values. Empty strings are treated as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggerOverrides {
    pub environment: Option<String>,
    pub level: Option<String>,
    pub transport: Option<String>,
    pub rotation_days: Option<String>,
    pub service_name: Option<String>,
    pub log_dir: Option<String>,
}

impl LoggerOverrides {
    /// Read overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read overrides through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            environment: get(ENV_ENVIRONMENT),
            level: get(ENV_LEVEL),
            transport: get(ENV_TRANSPORT),
            rotation_days: get(ENV_ROTATION_DAYS),
            service_name: get(ENV_SERVICE_NAME),
            log_dir: get(ENV_LOG_DIR),
        }
    }

    pub fn environment(&self) -> Environment {
        Environment::parse_or_default(self.environment.as_deref())
    }
}

impl LoggerConfiguration {
    /// Resolve configuration for `environment`, applying `overrides` on top
    /// of that environment's defaults. Never fails.
    pub fn resolve(environment: Environment, overrides: &LoggerOverrides) -> Self {
        let defaults = environment.defaults();
        let mut config = LoggerConfiguration::for_environment(environment);

        config.level = sanitize_level(overrides.level.as_deref(), defaults.level);
        config.retention_days =
            sanitize_retention_days(overrides.rotation_days.as_deref(), defaults.retention_days);

        if let Some(transport) = non_empty(&overrides.transport) {
            config.transports = Transports::parse(transport);
        }
        if let Some(service) = non_empty(&overrides.service_name) {
            config.service_name = service.to_string();
        }
        if let Some(dir) = non_empty(&overrides.log_dir) {
            config.log_dir = PathBuf::from(dir);
        }

        config
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::Level;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> LoggerOverrides {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        LoggerOverrides::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults_per_environment() {
        let expected = [
            (Environment::Development, Level::Debug, Transports::CONSOLE, 3),
            (Environment::Local, Level::Debug, Transports::CONSOLE, 3),
            (Environment::Qa, Level::Info, Transports::BOTH, 7),
            (Environment::Staging, Level::Info, Transports::BOTH, 7),
            (Environment::Production, Level::Error, Transports::FILE, 14),
        ];

        for (env, level, transports, days) in expected {
            let config = LoggerConfiguration::resolve(env, &LoggerOverrides::default());
            assert_eq!(config.level, level, "{env}");
            assert_eq!(config.transports, transports, "{env}");
            assert_eq!(config.retention_days, days, "{env}");
            assert!(config.redact);
            assert_eq!(config.environment, env);
        }
    }

    #[test]
    fn test_invalid_level_override_uses_environment_default() {
        for bad in ["file", "", "FOO"] {
            let overrides = lookup(&[(ENV_LEVEL, bad)]);
            let config = LoggerConfiguration::resolve(Environment::Production, &overrides);
            assert_eq!(config.level, Level::Error, "{bad:?}");
        }
    }

    #[test]
    fn test_overrides_from_lookup() {
        let overrides = lookup(&[
            (ENV_ENVIRONMENT, "staging"),
            (ENV_LEVEL, "Warn"),
            (ENV_TRANSPORT, "console"),
            (ENV_ROTATION_DAYS, "30"),
            (ENV_SERVICE_NAME, "accounts"),
            (ENV_LOG_DIR, "/var/log/accounts"),
        ]);
        let config = LoggerConfiguration::resolve(overrides.environment(), &overrides);

        assert_eq!(config.environment, Environment::Staging);
        assert_eq!(config.level, Level::Warn);
        assert_eq!(config.transports, Transports::CONSOLE);
        assert_eq!(config.retention_days, 30);
        assert_eq!(config.service_name, "accounts");
        assert_eq!(config.log_dir, PathBuf::from("/var/log/accounts"));
    }

    #[test]
    fn test_empty_values_are_unset() {
        let overrides = lookup(&[(ENV_TRANSPORT, "  "), (ENV_SERVICE_NAME, "")]);
        assert_eq!(overrides.transport, None);

        let config = LoggerConfiguration::resolve(Environment::Qa, &overrides);
        assert_eq!(config.transports, Transports::BOTH);
        assert_eq!(config.service_name, "user-service");
    }

    #[test]
    fn test_unknown_transport_disables_sinks() {
        let overrides = lookup(&[(ENV_TRANSPORT, "syslog")]);
        let config = LoggerConfiguration::resolve(Environment::Development, &overrides);
        assert!(config.transports.is_empty());
    }
}

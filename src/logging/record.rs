//! Log record and error detail types.

use std::error::Error as StdError;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::logging::level::Level;

/// Structured context attached to a record.
pub type Context = Map<String, Value>;

/// A single log record as it leaves the facade.
///
/// Serialized to one JSON line and handed to every accepting sink, which
/// parses it back independently before formatting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    /// ISO-8601 UTC timestamp with millisecond precision.
    pub timestamp: String,
    pub level: Level,
    pub service: String,
    pub environment: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Context>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetail>,
}

impl LogRecord {
    pub fn new(
        at: DateTime<Utc>,
        level: Level,
        service: &str,
        environment: &str,
        message: &str,
    ) -> Self {
        Self {
            timestamp: format_timestamp(at),
            level,
            service: service.to_string(),
            environment: environment.to_string(),
            message: message.to_string(),
            context: None,
            error: None,
        }
    }

    /// Serialize to the single-line JSON form sinks consume.
    pub fn to_line(&self) -> String {
        match serde_json::to_string(self) {
            Ok(line) => line,
            // Sinks treat this as malformed input and fall back to raw output.
            Err(_) => self.message.clone(),
        }
    }
}

/// Normalizes a caller-supplied context value into a map.
///
/// Objects are used as is, `null` means no context, any other value is
/// wrapped under a `value` key.
pub fn context_from_value(value: Value) -> Option<Context> {
    match value {
        Value::Null => None,
        Value::Object(map) => Some(map),
        other => {
            let mut map = Context::new();
            map.insert("value".to_string(), other);
            Some(map)
        }
    }
}

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Error information carried on `error` and `fatal` records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub name: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ErrorDetail {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            stack: None,
            code: None,
        }
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Captures an error value.
    ///
    /// `name` is the unqualified type name. The stack is the error's
    /// display followed by its `source()` chain, one cause per line.
    pub fn from_error<E>(err: &E) -> Self
    where
        E: StdError + 'static,
    {
        let name = short_type_name(std::any::type_name::<E>());
        let message = err.to_string();

        let mut stack = format!("{name}: {message}");
        let mut source = err.source();
        while let Some(cause) = source {
            stack.push_str("\n    caused by: ");
            stack.push_str(&cause.to_string());
            source = cause.source();
        }

        Self::new(name, message).with_stack(stack)
    }
}

fn short_type_name(full: &str) -> String {
    // Drop generic arguments before taking the last path segment.
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[derive(Debug, thiserror::Error)]
    #[error("connection refused")]
    struct ConnectError;

    #[derive(Debug, thiserror::Error)]
    #[error("query failed")]
    struct QueryError(#[source] ConnectError);

    #[test]
    fn test_timestamp_is_iso8601_millis() {
        let at = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(format_timestamp(at), "2025-01-02T03:04:05.000Z");
    }

    #[test]
    fn test_error_detail_from_error_chain() {
        let detail = ErrorDetail::from_error(&QueryError(ConnectError));
        assert_eq!(detail.name, "QueryError");
        assert_eq!(detail.message, "query failed");

        let stack = detail.stack.unwrap();
        assert!(stack.starts_with("QueryError: query failed"));
        assert!(stack.contains("caused by: connection refused"));
    }

    #[test]
    fn test_context_normalization() {
        assert_eq!(context_from_value(Value::Null), None);

        let map = context_from_value(json!({"a": 1})).unwrap();
        assert_eq!(map.get("a"), Some(&json!(1)));

        let wrapped = context_from_value(json!("text")).unwrap();
        assert_eq!(wrapped.get("value"), Some(&json!("text")));
    }

    #[test]
    fn test_line_omits_absent_fields() {
        let at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let record = LogRecord::new(at, Level::Info, "svc", "qa", "hello");
        let line = record.to_line();

        assert!(!line.contains("context"));
        assert!(!line.contains("error"));
        let parsed: LogRecord = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed, record);
    }
}

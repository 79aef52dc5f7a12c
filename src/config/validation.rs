//! Override sanitization.
//!
//! Invalid overrides never produce errors: each value is either accepted or
//! replaced by the environment default.

use crate::logging::Level;

/// Accepts `value` only if it names one of the fixed levels.
///
/// Guards against a transport keyword such as `file` landing in
/// `LOG_LEVEL`.
pub fn sanitize_level(value: Option<&str>, default: Level) -> Level {
    value
        .and_then(|v| v.parse::<Level>().ok())
        .unwrap_or(default)
}

/// Parses a retention override as whole days; unparsable input keeps the
/// default. Zero and negative values are kept (they disable pruning).
pub fn sanitize_retention_days(value: Option<&str>, default: i64) -> i64 {
    value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .unwrap_or(default)
}

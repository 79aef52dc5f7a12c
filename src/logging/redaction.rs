//! Sensitive-field censoring.
//!
//! # Responsibilities
//! - Hold the fixed denylist of sensitive paths
//! - Walk a `serde_json::Value` tree and replace matches with [`CENSOR`]
//!
//! # Design Decisions
//! - Paths are compiled once into matchers: exact dot paths anchored at the
//!   redaction root, and `*.field` wildcards matching that key in any object
//!   at any depth (arrays included)
//! - A matched value is replaced whole; its subtree is not visited
//! - The list is not configurable; only the on/off flag is

use serde_json::Value;

/// Replacement for every censored value.
pub const CENSOR: &str = "[REDACTED]";

/// Paths censored when redaction is enabled.
///
/// Exact paths are relative to the record's context (or error) object.
pub const DENYLIST: &[&str] = &[
    // headers
    "headers.authorization",
    "headers.cookie",
    "headers.x-api-key",
    "req.headers.authorization",
    "req.headers.cookie",
    "req.headers.x-api-key",
    // top-level identity fields
    "password",
    "token",
    "accessToken",
    "refreshToken",
    "apiKey",
    "secret",
    "email",
    "phone",
    "phoneNumber",
    // nested payloads
    "data.password",
    "data.token",
    "data.email",
    "data.phone",
    "context.password",
    "context.token",
    "context.email",
    "body.password",
    "body.email",
    "body.phone",
    "req.body.password",
    "req.body.email",
    "req.body.phone",
    // any depth
    "*.password",
    "*.token",
    "*.accessToken",
    "*.refreshToken",
    "*.apiKey",
    "*.secret",
    "*.creditCard",
    "*.cardNumber",
    "*.cvv",
    "*.ssn",
    "*.nationalId",
];

#[derive(Debug, Clone, PartialEq, Eq)]
enum PathMatcher {
    /// `a.b.c` anchored at the root.
    Exact(Vec<String>),
    /// `*.key`: any object, any depth.
    AnyDepth(String),
}

impl PathMatcher {
    fn compile(path: &str) -> Self {
        match path.strip_prefix("*.") {
            Some(key) => PathMatcher::AnyDepth(key.to_string()),
            None => PathMatcher::Exact(path.split('.').map(str::to_string).collect()),
        }
    }
}

/// Precompiled set of path matchers.
#[derive(Debug, Clone)]
pub struct Redactor {
    exact: Vec<Vec<String>>,
    any_depth: Vec<String>,
}

impl Redactor {
    pub fn new<'a>(paths: impl IntoIterator<Item = &'a str>) -> Self {
        let mut exact = Vec::new();
        let mut any_depth = Vec::new();
        for path in paths {
            match PathMatcher::compile(path) {
                PathMatcher::Exact(segments) => exact.push(segments),
                PathMatcher::AnyDepth(key) => any_depth.push(key),
            }
        }
        Self { exact, any_depth }
    }

    /// Redactor over the fixed [`DENYLIST`].
    pub fn denylist() -> Self {
        Self::new(DENYLIST.iter().copied())
    }

    /// Censor every matching field in `value`, in place.
    pub fn redact(&self, value: &mut Value) {
        let mut path = Vec::new();
        self.walk(value, &mut path, true);
    }

    /// `anchored` is false once the walk has passed through an array, after
    /// which only wildcard matchers apply.
    fn walk(&self, value: &mut Value, path: &mut Vec<String>, anchored: bool) {
        match value {
            Value::Object(map) => {
                for (key, child) in map.iter_mut() {
                    path.push(key.clone());
                    if self.matches(path, key, anchored) {
                        *child = Value::String(CENSOR.to_string());
                    } else {
                        self.walk(child, path, anchored);
                    }
                    path.pop();
                }
            }
            Value::Array(items) => {
                for item in items.iter_mut() {
                    self.walk(item, path, false);
                }
            }
            _ => {}
        }
    }

    fn matches(&self, path: &[String], key: &str, anchored: bool) -> bool {
        if self.any_depth.iter().any(|k| k == key) {
            return true;
        }
        anchored && self.exact.iter().any(|segments| segments.as_slice() == path)
    }
}

impl Default for Redactor {
    fn default() -> Self {
        Self::denylist()
    }
}

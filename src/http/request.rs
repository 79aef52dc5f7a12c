//! Request logging middleware.
//!
//! # Responsibilities
//! - Read the request ID assigned by `SetRequestIdLayer` (or mint one)
//! - Log arrival and completion of every request with client metadata
//! - Hand handlers a child logger bound to the request ID
//!
//! # Design Decisions
//! - Context keys are fixed: `requestId`, `ip`, `userAgent`, `method`, `path`
//! - Completion level follows the status class (5xx error, 4xx warn)

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{header, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::logging::{Context, Level, Logger};

pub const X_REQUEST_ID: &str = "x-request-id";

/// Request ID carried in request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

/// Logs each request through `logger` and inserts a request-scoped
/// [`Logger`] and [`RequestId`] into the request extensions.
pub async fn request_logging(
    State(logger): State<Logger>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let start = Instant::now();

    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let ip = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| Value::String(addr.ip().to_string()))
        .unwrap_or(Value::Null);

    let user_agent = request
        .headers()
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(|v| Value::String(v.to_string()))
        .unwrap_or(Value::Null);

    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let mut bindings = Context::new();
    bindings.insert("requestId".to_string(), json!(request_id));
    let request_logger = logger.with_context(bindings);

    request_logger.info(
        "Incoming request",
        Some(json!({
            "ip": ip,
            "userAgent": user_agent,
            "method": method,
            "path": path,
        })),
    );

    request
        .extensions_mut()
        .insert(RequestId(request_id.clone()));
    request.extensions_mut().insert(request_logger.clone());

    let mut response = next.run(request).await;

    let status = response.status();
    let level = if status.is_server_error() {
        Level::Error
    } else if status.is_client_error() {
        Level::Warn
    } else {
        Level::Info
    };

    request_logger.log(
        level,
        "Request completed",
        Some(json!({
            "method": method,
            "path": path,
            "statusCode": status.as_u16(),
            "durationMs": start.elapsed().as_millis() as u64,
        })),
        None,
    );

    if !response.headers().contains_key(X_REQUEST_ID) {
        if let Ok(value) = HeaderValue::from_str(&request_id) {
            response.headers_mut().insert(X_REQUEST_ID, value);
        }
    }

    response
}

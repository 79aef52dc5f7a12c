//! Request logging through the HTTP stack.

use std::net::SocketAddr;
use std::time::Duration;

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{header, Request, StatusCode};
use axum::routing::get;
use axum::{Extension, Router};
use tower::ServiceExt;
use user_service::config::{Environment, LoggerConfiguration, Transports};
use user_service::http::{request_logging, HttpServer, RequestId, X_REQUEST_ID};
use user_service::logging::Level;

mod common;

fn console_config() -> LoggerConfiguration {
    let mut config = LoggerConfiguration::for_environment(Environment::Local);
    config.service_name = "svc".to_string();
    config.level = Level::Info;
    config.transports = Transports::CONSOLE;
    config
}

#[tokio::test]
async fn test_health_request_logged() {
    let (logger, console) = common::capturing_logger(&console_config());
    let server = HttpServer::new(logger, Duration::from_secs(5));

    let mut request = Request::builder()
        .uri("/health")
        .header(header::USER_AGENT, "integration-test/1.0")
        .body(Body::empty())
        .unwrap();
    let peer: SocketAddr = "203.0.113.7:50000".parse().unwrap();
    request.extensions_mut().insert(ConnectInfo(peer));

    let response = server.router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let request_id = response
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .expect("request id propagated")
        .to_string();

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "ok");
    assert_eq!(body["data"]["service"], "svc");

    let logs = console.contents();
    assert!(logs.contains("Incoming request"));
    assert!(logs.contains("Request completed"));
    assert!(logs.contains("\"userAgent\": \"integration-test/1.0\""));
    assert!(logs.contains("\"ip\": \"203.0.113.7\""));
    assert!(logs.contains("\"method\": \"GET\""));
    assert!(logs.contains("\"path\": \"/health\""));
    assert!(logs.contains("\"statusCode\": 200"));
    assert!(logs.contains(&format!("\"requestId\": \"{request_id}\"")));
    // Health checks log at debug, below the info threshold.
    assert!(!logs.contains("Health check"));
}

#[tokio::test]
async fn test_unknown_route_logged_as_warning() {
    let (logger, console) = common::capturing_logger(&console_config());
    let server = HttpServer::new(logger, Duration::from_secs(5));

    let request = Request::builder()
        .uri("/users/unknown/route")
        .header(X_REQUEST_ID, "req-123")
        .body(Body::empty())
        .unwrap();

    let response = server.router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.headers().get(X_REQUEST_ID).unwrap(), "req-123");

    let logs = console.contents();
    assert!(logs.contains("[WARN]"));
    assert!(logs.contains("\"statusCode\": 404"));
    assert!(logs.contains("\"requestId\": \"req-123\""));
}

#[tokio::test]
async fn test_handlers_receive_request_id() {
    let (logger, console) = common::capturing_logger(&console_config());
    let app = Router::new()
        .route(
            "/whoami",
            get(|Extension(id): Extension<RequestId>| async move { id.0 }),
        )
        .layer(axum::middleware::from_fn_with_state(logger, request_logging));

    let request = Request::builder()
        .uri("/whoami")
        .header(X_REQUEST_ID, "req-from-client")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get(X_REQUEST_ID).unwrap(), "req-from-client");

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"req-from-client");
    assert!(console.contents().contains("\"requestId\": \"req-from-client\""));
}

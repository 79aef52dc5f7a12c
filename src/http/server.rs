//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router (health endpoint, JSON fallback)
//! - Wire up middleware (request ID, tracing, request logging, timeout)
//! - Serve on a listener until shutdown

use std::net::SocketAddr;
use std::time::{Duration, Instant};

use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::error::ServerError;
use crate::http::request::request_logging;
use crate::lifecycle::shutdown::wait_for;
use crate::logging::Logger;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub logger: Logger,
    pub started_at: Instant,
}

/// HTTP server for the service.
pub struct HttpServer {
    router: Router,
    logger: Logger,
}

impl HttpServer {
    pub fn new(logger: Logger, request_timeout: Duration) -> Self {
        let state = AppState {
            logger: logger.clone(),
            started_at: Instant::now(),
        };
        let router = Self::build_router(state, request_timeout);
        Self { router, logger }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(state: AppState, request_timeout: Duration) -> Router {
        let logger = state.logger.clone();
        Router::new()
            .route("/health", get(health_handler))
            .fallback(not_found_handler)
            .with_state(state)
            .layer(TimeoutLayer::new(request_timeout))
            .layer(middleware::from_fn_with_state(logger, request_logging))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The fully layered router, for embedding or in-process tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        self.logger
            .info("HTTP server starting", Some(json!({ "address": addr.to_string() })));

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(wait_for(shutdown))
            .await?;

        self.logger.info("HTTP server stopped", None);
        Ok(())
    }
}

async fn health_handler(
    State(state): State<AppState>,
    Extension(logger): Extension<Logger>,
) -> impl IntoResponse {
    logger.debug("Health check", None);
    Json(json!({
        "success": true,
        "data": {
            "status": "ok",
            "service": state.logger.service(),
            "environment": state.logger.environment(),
            "uptimeSeconds": state.started_at.elapsed().as_secs(),
        }
    }))
}

async fn not_found_handler() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "error": { "message": "Route not found" }
        })),
    )
}

//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID assignment)
//!     → request.rs (request logging, request-scoped logger)
//!     → handler
//!     → response with x-request-id
//! ```

pub mod request;
pub mod server;

pub use request::{request_logging, RequestId, X_REQUEST_ID};
pub use server::{AppState, HttpServer};

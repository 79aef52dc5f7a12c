//! User management service: structured logging core and HTTP host.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod logging;

pub use config::LoggerConfiguration;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use logging::Logger;

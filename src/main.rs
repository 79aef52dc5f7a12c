//! User management service.
//!
//! # Architecture Overview
//!
//! ```text
//!   NODE_ENV, LOG_*  ──▶  config  ──▶  LoggerConfiguration
//!                                            │
//!                                            ▼
//!                                   lifecycle::startup
//!                              (build Logger, prune old logs)
//!                                            │
//!                 ┌──────────────────────────┼─────────────────────────┐
//!                 ▼                          ▼                         ▼
//!        tracing subscriber           HTTP server                 handlers
//!        (LoggerLayer bridge)   (request logging middleware)  (request-scoped
//!                                                               Logger)
//!                                            │
//!                                            ▼
//!                                 console sink / daily file sink
//! ```

use std::time::Duration;

use clap::Parser;
use serde_json::json;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use user_service::config::LoggerOverrides;
use user_service::error::ServerError;
use user_service::lifecycle::{init_logging, Shutdown};
use user_service::logging::{ErrorDetail, LoggerLayer};
use user_service::HttpServer;

#[derive(Parser)]
#[command(name = "user-service")]
#[command(about = "User management REST API", long_about = None)]
struct Cli {
    /// Address to listen on.
    #[arg(short, long, env = "BIND_ADDRESS", default_value = "0.0.0.0:3000")]
    bind: String,

    /// Request timeout in seconds.
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    request_timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let runtime = init_logging(&LoggerOverrides::from_env());
    let logger = runtime.logger.clone();

    // Framework diagnostics go through the same sinks.
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tower_http=warn".into()),
        )
        .with(LoggerLayer::new(logger.clone()))
        .init();

    let listener = match TcpListener::bind(&cli.bind).await {
        Ok(listener) => listener,
        Err(source) => {
            let err = ServerError::Bind {
                address: cli.bind.clone(),
                source,
            };
            logger.fatal(
                "Failed to bind listener",
                Some(json!({ "address": cli.bind })),
                Some(&ErrorDetail::from_error(&err)),
            );
            return Err(err.into());
        }
    };

    let shutdown = Shutdown::new();
    shutdown.trigger_on_ctrl_c();

    let server = HttpServer::new(logger.clone(), Duration::from_secs(cli.request_timeout_secs));
    if let Err(e) = server.run(listener, shutdown.subscribe()).await {
        logger.fatal("HTTP server failed", None, Some(&ErrorDetail::from_error(&e)));
        return Err(e.into());
    }

    logger.info("Shutdown complete", None);
    Ok(())
}

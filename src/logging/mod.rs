//! Structured logging subsystem.
//!
//! # Data Flow
//! ```text
//! LoggerConfiguration (resolved once at startup)
//!     → sink/ (console and/or daily file, each gated by level)
//!     → logger.rs (facade: build record → redaction.rs → fan out)
//!     → retention.rs (prune expired files once at startup)
//!
//! tracing events (framework diagnostics)
//!     → layer.rs → logger.rs
//! ```
//!
//! # Design Decisions
//! - The logger is an explicit value handed to consumers, not a global
//! - Records cross the sink boundary as one JSON line; each sink parses
//!   and formats it independently, with a raw fallback
//! - Redaction is a fixed denylist, switched only by configuration
//! - Logging never fails the caller

pub mod layer;
pub mod level;
pub mod logger;
pub mod record;
pub mod redaction;
pub mod retention;
pub mod sink;

pub use layer::LoggerLayer;
pub use level::Level;
pub use logger::Logger;
pub use record::{Context, ErrorDetail, LogRecord};
pub use redaction::{Redactor, CENSOR};
pub use retention::{prune_expired_logs, PruneReport};
pub use sink::{ConsoleSink, FileSink, Sink};

//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Resolve logger config → Build logger → Prune old logs → Start server
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting → Drain connections → Exit
//! ```
//!
//! # Design Decisions
//! - Logging is initialized first so every later step can report
//! - Pruning runs once per process, never on a timer

pub mod shutdown;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{init_logging, LoggingRuntime};

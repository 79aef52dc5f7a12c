//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! environment variables (NODE_ENV, LOG_*)
//!     → loader.rs (collect overrides, empty = unset)
//!     → validation.rs (sanitize level / retention, fall back to defaults)
//!     → LoggerConfiguration (resolved, immutable)
//!     → handed to the logger at startup
//! ```
//!
//! # Design Decisions
//! - Configuration is resolved once per process and never mutated
//! - Every environment has a complete default set
//! - Invalid input falls back to the default instead of failing startup

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::LoggerOverrides;
pub use schema::{Environment, EnvironmentDefaults, LoggerConfiguration, Transports};

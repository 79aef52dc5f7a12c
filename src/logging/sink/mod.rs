//! Log sinks.
//!
//! # Data Flow
//! ```text
//! Logger (serialized record line)
//!     → Sink::accepts (per-sink level threshold)
//!     → console.rs ([LEVEL] pretty JSON → stdout)
//!     → file.rs    ([ts] [LEVEL] message / CONTEXT / ERROR → daily file)
//! ```
//!
//! # Design Decisions
//! - Closed set of variants; no plugin interface
//! - Each sink parses the line itself and falls back to raw output
//! - Sinks report write failures; the facade decides what to do with them

pub mod console;
pub mod file;

pub use console::{BufferWriter, ConsoleSink};
pub use file::FileSink;

use crate::config::LoggerConfiguration;
use crate::error::LoggingError;
use crate::logging::level::Level;

/// A configured output destination.
#[derive(Debug)]
pub enum Sink {
    Console(ConsoleSink),
    File(FileSink),
}

impl Sink {
    /// Minimum level this sink accepts.
    pub fn level(&self) -> Level {
        match self {
            Sink::Console(sink) => sink.level(),
            Sink::File(sink) => sink.level(),
        }
    }

    /// Whether a record at `level` should reach this sink.
    pub fn accepts(&self, level: Level) -> bool {
        self.level().accepts(level)
    }

    /// Format and write one serialized record.
    pub fn write_line(&self, line: &str) -> Result<(), LoggingError> {
        match self {
            Sink::Console(sink) => sink.write_line(line),
            Sink::File(sink) => sink.write_line(line),
        }
    }
}

impl From<ConsoleSink> for Sink {
    fn from(sink: ConsoleSink) -> Self {
        Sink::Console(sink)
    }
}

impl From<FileSink> for Sink {
    fn from(sink: FileSink) -> Self {
        Sink::File(sink)
    }
}

/// Sinks for `config`, console first.
///
/// A file sink that cannot be opened is left out and its error returned
/// alongside the sinks that were created.
pub fn build_sinks(config: &LoggerConfiguration) -> (Vec<Sink>, Vec<LoggingError>) {
    let mut sinks = Vec::new();
    let mut errors = Vec::new();

    if config.transports.console {
        sinks.push(Sink::Console(ConsoleSink::stdout(config.level)));
    }

    if config.transports.file {
        match FileSink::open(config.level, &config.log_dir, &config.service_name) {
            Ok(sink) => sinks.push(Sink::File(sink)),
            Err(e) => errors.push(e),
        }
    }

    (sinks, errors)
}

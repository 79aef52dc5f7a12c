//! Console sink: pretty-printed record blocks on standard output.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use crate::error::LoggingError;
use crate::logging::level::Level;
use crate::logging::record::LogRecord;

/// Writes each record as `[LEVEL] {pretty JSON}`.
pub struct ConsoleSink {
    level: Level,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleSink {
    /// Console sink writing to standard output.
    pub fn stdout(level: Level) -> Self {
        Self::with_writer(level, io::stdout())
    }

    /// Console sink writing to `writer`; used to capture output in tests.
    pub fn with_writer<W>(level: Level, writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            level,
            writer: Mutex::new(Box::new(writer)),
        }
    }

    /// Minimum level this sink accepts.
    pub fn level(&self) -> Level {
        self.level
    }

    /// Format one serialized record and write it as a single block.
    pub fn write_line(&self, line: &str) -> Result<(), LoggingError> {
        let block = format_block(line);
        let mut writer = self.writer.lock().map_err(|_| LoggingError::Poisoned)?;
        writer.write_all(block.as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

impl std::fmt::Debug for ConsoleSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleSink").field("level", &self.level).finish()
    }
}

/// Formats one serialized record. Input that does not parse as a record is
/// passed through unchanged.
pub fn format_block(line: &str) -> String {
    let record = match serde_json::from_str::<LogRecord>(line) {
        Ok(record) => record,
        Err(_) => return with_newline(line),
    };

    match serde_json::to_string_pretty(&record) {
        Ok(pretty) => format!("[{}] {}\n", record.level.label(), pretty),
        Err(_) => with_newline(line),
    }
}

fn with_newline(line: &str) -> String {
    if line.ends_with('\n') {
        line.to_string()
    } else {
        format!("{line}\n")
    }
}

/// Clonable in-memory writer, for capturing sink output.
#[derive(Debug, Clone, Default)]
pub struct BufferWriter {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl BufferWriter {
    /// Empty shared buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        match self.inner.lock() {
            Ok(buf) => String::from_utf8_lossy(&buf).into_owned(),
            Err(poisoned) => String::from_utf8_lossy(&poisoned.into_inner()).into_owned(),
        }
    }
}

impl Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| io::Error::other("buffer lock poisoned"))?;
        inner.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn sample_line() -> String {
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let mut record = LogRecord::new(at, Level::Warn, "svc", "qa", "disk almost full");
        record.context = json!({"usage": 91}).as_object().cloned();
        record.to_line()
    }

    #[test]
    fn test_block_is_prefixed_and_pretty() {
        let block = format_block(&sample_line());
        assert!(block.starts_with("[WARN] {\n"));
        assert!(block.contains("\"message\": \"disk almost full\""));
        assert!(block.contains("\"usage\": 91"));
        assert!(block.contains("\"service\": \"svc\""));
        assert!(block.contains("\"environment\": \"qa\""));
    }

    #[test]
    fn test_malformed_input_passes_through() {
        assert_eq!(format_block("not json"), "not json\n");
        assert_eq!(format_block("{\"message\":1}"), "{\"message\":1}\n");
    }

    #[test]
    fn test_writes_to_injected_writer() {
        let buffer = BufferWriter::new();
        let sink = ConsoleSink::with_writer(Level::Info, buffer.clone());
        sink.write_line(&sample_line()).unwrap();
        assert!(buffer.contents().starts_with("[WARN]"));
    }
}

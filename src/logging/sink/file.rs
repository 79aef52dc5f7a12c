//! Daily log file sink.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use tracing_appender::rolling::{RollingFileAppender, Rotation};

use crate::error::LoggingError;
use crate::logging::level::Level;
use crate::logging::record::{format_timestamp, LogRecord};

const SEPARATOR: &str =
    "--------------------------------------------------------------------------------";
const BANNER_RULE: &str =
    "================================================================================";

/// Appends human-readable blocks to `<dir>/<service>-<YYYY-MM-DD>.log`.
///
/// The date is fixed when the sink is opened and the appender never rotates,
/// so a long-running process keeps writing to the same file across midnight.
pub struct FileSink {
    level: Level,
    path: PathBuf,
    appender: Mutex<RollingFileAppender>,
}

impl FileSink {
    /// Open today's file under `dir`, creating the directory as needed.
    pub fn open(level: Level, dir: &Path, service: &str) -> Result<Self, LoggingError> {
        Self::open_at(level, dir, service, Utc::now())
    }

    /// Open the file for the day of `now`.
    pub fn open_at(
        level: Level,
        dir: &Path,
        service: &str,
        now: DateTime<Utc>,
    ) -> Result<Self, LoggingError> {
        fs::create_dir_all(dir).map_err(|source| LoggingError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;

        let name = file_name(service, now);
        let path = dir.join(&name);
        let is_new = fs::metadata(&path).map(|m| m.len() == 0).unwrap_or(true);

        let mut appender = RollingFileAppender::builder()
            .rotation(Rotation::NEVER)
            .filename_prefix(name)
            .build(dir)
            .map_err(|source| LoggingError::OpenFile {
                path: path.clone(),
                source,
            })?;

        if is_new {
            appender.write_all(session_banner(now).as_bytes())?;
        }

        Ok(Self {
            level,
            path,
            appender: Mutex::new(appender),
        })
    }

    /// Minimum level this sink accepts.
    pub fn level(&self) -> Level {
        self.level
    }

    /// Path of the file being appended to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Format one serialized record and append it to the file.
    pub fn write_line(&self, line: &str) -> Result<(), LoggingError> {
        let block = format_block(line);
        let mut appender = self.appender.lock().map_err(|_| LoggingError::Poisoned)?;
        appender.write_all(block.as_bytes())?;
        appender.flush()?;
        Ok(())
    }
}

impl std::fmt::Debug for FileSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSink")
            .field("level", &self.level)
            .field("path", &self.path)
            .finish()
    }
}

/// `<service>-<YYYY-MM-DD>.log`
pub fn file_name(service: &str, date: DateTime<Utc>) -> String {
    format!("{}-{}.log", service, date.format("%Y-%m-%d"))
}

fn session_banner(now: DateTime<Utc>) -> String {
    format!(
        "{BANNER_RULE}\nSESSION START: {}\n{BANNER_RULE}\n",
        format_timestamp(now)
    )
}

/// Renders one serialized record. Input that does not parse as a record is
/// written after a `[RAW LOG]` marker.
pub fn format_block(line: &str) -> String {
    let record = match serde_json::from_str::<LogRecord>(line) {
        Ok(record) => record,
        Err(_) => return raw_block(line),
    };

    let mut block = format!(
        "[{}] [{}] {}\n",
        record.timestamp,
        record.level.label(),
        record.message
    );

    if let Some(context) = record.context.as_ref().filter(|c| !c.is_empty()) {
        match serde_json::to_string_pretty(context) {
            Ok(pretty) => block.push_str(&format!("CONTEXT: {pretty}\n")),
            Err(_) => return raw_block(line),
        }
    }

    if let Some(error) = &record.error {
        match serde_json::to_string_pretty(error) {
            Ok(pretty) => block.push_str(&format!("ERROR: {pretty}\n")),
            Err(_) => return raw_block(line),
        }
    }

    block.push_str(SEPARATOR);
    block.push('\n');
    block
}

fn raw_block(line: &str) -> String {
    let mut block = format!("[RAW LOG]\n{line}");
    if !line.ends_with('\n') {
        block.push('\n');
    }
    block
}

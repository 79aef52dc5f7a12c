//! Shared helpers for integration tests.

use std::path::Path;

use user_service::config::{Environment, LoggerConfiguration, LoggerOverrides};
use user_service::logging::sink::BufferWriter;
use user_service::logging::{ConsoleSink, FileSink, Logger, Sink};

/// Overrides for `environment` with logs written under `dir`.
#[allow(dead_code)]
pub fn overrides_in(dir: &Path, environment: Environment, transport: Option<&str>) -> LoggerOverrides {
    LoggerOverrides {
        environment: Some(environment.to_string()),
        transport: transport.map(str::to_string),
        service_name: Some("svc".to_string()),
        log_dir: Some(dir.display().to_string()),
        ..LoggerOverrides::default()
    }
}

/// Builds the same sinks `Logger::new` would, but with the console sink
/// writing into a buffer instead of stdout.
#[allow(dead_code)]
pub fn capturing_logger(config: &LoggerConfiguration) -> (Logger, BufferWriter) {
    let buffer = BufferWriter::new();
    let mut sinks: Vec<Sink> = Vec::new();

    if config.transports.console {
        sinks.push(ConsoleSink::with_writer(config.level, buffer.clone()).into());
    }
    if config.transports.file {
        let file = FileSink::open(config.level, &config.log_dir, &config.service_name)
            .expect("file sink should open in a temp dir");
        sinks.push(file.into());
    }

    (Logger::with_sinks(config, sinks), buffer)
}

/// Contents of the only `svc-*.log` file in `dir`.
#[allow(dead_code)]
pub fn read_log_file(dir: &Path) -> String {
    let entries: Vec<_> = std::fs::read_dir(dir)
        .expect("log dir exists")
        .flatten()
        .filter(|e| {
            let name = e.file_name();
            let name = name.to_string_lossy();
            name.starts_with("svc-") && name.ends_with(".log")
        })
        .collect();
    assert_eq!(entries.len(), 1, "expected exactly one log file");
    std::fs::read_to_string(entries[0].path()).expect("log file readable")
}

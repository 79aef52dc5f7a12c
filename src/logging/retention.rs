//! Startup pruning of expired log files.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Duration, NaiveDate, Utc};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Outcome of a pruning pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PruneReport {
    /// Files deleted.
    pub removed: usize,
    /// Expired files that could not be deleted.
    pub skipped: usize,
}

/// Delete `<service>-YYYY-MM-DD.log` files in `dir` older than
/// `retention_days`. Best-effort: individual failures are counted, never
/// returned.
pub fn prune_expired_logs(dir: &Path, service: &str, retention_days: i64) -> PruneReport {
    prune_expired_logs_at(dir, service, retention_days, Utc::now())
}

/// [`prune_expired_logs`] evaluated against `now`.
pub fn prune_expired_logs_at(
    dir: &Path,
    service: &str,
    retention_days: i64,
    now: DateTime<Utc>,
) -> PruneReport {
    let mut report = PruneReport::default();
    if retention_days <= 0 {
        return report;
    }

    let Ok(entries) = fs::read_dir(dir) else {
        return report;
    };

    let Some(cutoff) = Duration::try_milliseconds(retention_days.saturating_mul(MILLIS_PER_DAY))
        .and_then(|window| now.checked_sub_signed(window))
    else {
        return report;
    };
    let prefix = format!("{service}-");

    for entry in entries.flatten() {
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        let Some(date) = name
            .strip_prefix(&prefix)
            .and_then(|rest| rest.strip_suffix(".log"))
        else {
            continue;
        };

        match parse_file_date(date) {
            Some(file_date) if file_date < cutoff => match fs::remove_file(entry.path()) {
                Ok(()) => report.removed += 1,
                Err(_) => report.skipped += 1,
            },
            // Not dated, or another service sharing the prefix.
            _ => {}
        }
    }

    report
}

/// Midnight UTC of a `YYYY-MM-DD` suffix.
fn parse_file_date(date: &str) -> Option<DateTime<Utc>> {
    let day = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    Some(day.and_hms_opt(0, 0, 0)?.and_utc())
}

//! Append-only symptom report log.
//!
//! Reports are appended to a JSONL (JSON Lines) file with file locking
//! to ensure safe concurrent access. The classifier consumes the last
//! seven days of this log for pattern recognition.

use crate::{Result, SymptomReport};
use chrono::{Duration, Utc};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Report sink trait for persisting symptom reports
pub trait ReportSink {
    fn append(&mut self, report: &SymptomReport) -> Result<()>;
}

/// JSONL-based report sink with file locking
pub struct JsonlSink {
    path: PathBuf,
}

impl JsonlSink {
    /// Create a new JSONL sink for the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl ReportSink for JsonlSink {
    fn append(&mut self, report: &SymptomReport) -> Result<()> {
        self.ensure_parent_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        // Exclusive lock while appending
        file.lock_exclusive()?;

        let mut writer = std::io::BufWriter::new(&file);
        let line = serde_json::to_string(report)?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        file.unlock()?;

        tracing::debug!("Appended report {} to log", report.id);
        Ok(())
    }
}

/// Read all reports from a log file
///
/// Malformed lines are skipped with a warning rather than failing the
/// whole read.
pub fn read_reports(path: &Path) -> Result<Vec<SymptomReport>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    // Shared lock for reading
    file.lock_shared()?;

    let reader = BufReader::new(&file);
    let mut reports = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<SymptomReport>(&line) {
            Ok(report) => reports.push(report),
            Err(e) => {
                tracing::warn!("Failed to parse report at line {}: {}", line_num + 1, e);
            }
        }
    }

    file.unlock()?;
    tracing::debug!("Read {} reports from log", reports.len());
    Ok(reports)
}

/// Load reports from the last N days, sorted newest first
pub fn load_recent_reports(path: &Path, days: i64) -> Result<Vec<SymptomReport>> {
    let cutoff = Utc::now() - Duration::days(days);

    let mut reports: Vec<_> = read_reports(path)?
        .into_iter()
        .filter(|r| r.reported_at >= cutoff)
        .collect();

    reports.sort_by(|a, b| b.reported_at.cmp(&a.reported_at));

    tracing::info!(
        "Loaded {} reports from the last {} days",
        reports.len(),
        days
    );

    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DurationBucket;
    use chrono::Utc;
    use uuid::Uuid;

    fn create_test_report(tag: &str, days_ago: i64) -> SymptomReport {
        SymptomReport {
            id: Uuid::new_v4(),
            tags: vec![tag.into()],
            severity: 5,
            duration: DurationBucket::OneToSixHours,
            reported_at: Utc::now() - Duration::days(days_ago),
            notes: None,
        }
    }

    #[test]
    fn test_append_and_read_single_report() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("reports.jsonl");

        let report = create_test_report("headache", 0);
        let report_id = report.id;

        let mut sink = JsonlSink::new(&log_path);
        sink.append(&report).unwrap();

        let reports = read_reports(&log_path).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].id, report_id);
        assert_eq!(reports[0].tags, vec!["headache".to_string()]);
    }

    #[test]
    fn test_append_multiple_reports() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("reports.jsonl");

        let mut sink = JsonlSink::new(&log_path);
        for _ in 0..5 {
            sink.append(&create_test_report("nausea", 0)).unwrap();
        }

        let reports = read_reports(&log_path).unwrap();
        assert_eq!(reports.len(), 5);
    }

    #[test]
    fn test_read_empty_log() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("nonexistent.jsonl");

        let reports = read_reports(&log_path).unwrap();
        assert!(reports.is_empty());
    }

    #[test]
    fn test_recent_window_filters_old_reports() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("reports.jsonl");

        let mut sink = JsonlSink::new(&log_path);
        sink.append(&create_test_report("recent", 1)).unwrap();
        sink.append(&create_test_report("also_recent", 3)).unwrap();
        sink.append(&create_test_report("stale", 10)).unwrap();

        let reports = load_recent_reports(&log_path, 7).unwrap();
        assert_eq!(reports.len(), 2);
    }

    #[test]
    fn test_recent_reports_sorted_newest_first() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("reports.jsonl");

        let mut sink = JsonlSink::new(&log_path);
        sink.append(&create_test_report("old", 5)).unwrap();
        sink.append(&create_test_report("new", 1)).unwrap();

        let reports = load_recent_reports(&log_path, 7).unwrap();
        assert_eq!(reports[0].tags[0], "new");
        assert_eq!(reports[1].tags[0], "old");
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("reports.jsonl");

        let mut sink = JsonlSink::new(&log_path);
        sink.append(&create_test_report("valid", 0)).unwrap();

        let mut file = OpenOptions::new().append(true).open(&log_path).unwrap();
        writeln!(file, "{{ not json").unwrap();

        let reports = read_reports(&log_path).unwrap();
        assert_eq!(reports.len(), 1);
    }
}

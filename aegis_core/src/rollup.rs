//! CSV archival for the symptom report log.
//!
//! Converts the append-only JSONL log into a long-term CSV archive
//! atomically, so a crash between the two steps never loses reports.

use crate::{Result, SymptomReport};
use std::fs::OpenOptions;
use std::path::Path;

/// A row in the CSV archive
#[derive(Debug, serde::Serialize)]
struct CsvRow {
    id: String,
    tags: String,
    severity: u8,
    duration: String,
    reported_at: String,
    notes: Option<String>,
}

impl From<&SymptomReport> for CsvRow {
    fn from(report: &SymptomReport) -> Self {
        CsvRow {
            id: report.id.to_string(),
            tags: report.tags.join(";"),
            severity: report.severity,
            duration: report.duration.display().to_string(),
            reported_at: report.reported_at.to_rfc3339(),
            notes: report.notes.clone(),
        }
    }
}

/// Roll up logged reports into CSV and archive the log atomically
///
/// This function:
/// 1. Reads all reports from the JSONL log
/// 2. Appends them to the CSV file (creates with headers if needed)
/// 3. Syncs the CSV to disk
/// 4. Renames the log to .processed
/// 5. Returns the number of reports processed
///
/// The CSV is fsynced before the log is renamed, and the log is
/// renamed rather than deleted so manual recovery stays possible.
pub fn log_to_csv_and_archive(log_path: &Path, csv_path: &Path) -> Result<usize> {
    let reports = crate::report_log::read_reports(log_path)?;

    if reports.is_empty() {
        tracing::info!("No reports in log to roll up");
        return Ok(0);
    }

    if let Some(parent) = csv_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(csv_path)?;

    // Only write headers when the file is fresh
    let needs_headers = file.metadata()?.len() == 0;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(needs_headers)
        .from_writer(file);

    for report in &reports {
        writer.serialize(CsvRow::from(report))?;
    }

    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    file.sync_all()?;

    tracing::info!("Wrote {} reports to CSV", reports.len());

    let processed_path = log_path.with_extension("jsonl.processed");
    std::fs::rename(log_path, &processed_path)?;

    tracing::info!("Archived report log to {:?}", processed_path);

    Ok(reports.len())
}

/// Clean up old processed log files in the given directory
pub fn cleanup_processed_logs(dir: &Path) -> Result<usize> {
    if !dir.exists() {
        return Ok(0);
    }

    let mut count = 0;
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if let Some(extension) = path.extension() {
            if extension == "processed" {
                std::fs::remove_file(&path)?;
                tracing::debug!("Removed processed log: {:?}", path);
                count += 1;
            }
        }
    }

    if count > 0 {
        tracing::info!("Cleaned up {} processed log files", count);
    }

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report_log::{JsonlSink, ReportSink};
    use crate::DurationBucket;
    use chrono::Utc;
    use std::fs::File;
    use uuid::Uuid;

    fn create_test_report(tag: &str) -> SymptomReport {
        SymptomReport {
            id: Uuid::new_v4(),
            tags: vec![tag.into(), "nausea".into()],
            severity: 5,
            duration: DurationBucket::OneToThreeDays,
            reported_at: Utc::now(),
            notes: Some("after lunch".into()),
        }
    }

    #[test]
    fn test_log_to_csv_creates_and_archives() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("reports.jsonl");
        let csv_path = temp_dir.path().join("reports.csv");

        let mut sink = JsonlSink::new(&log_path);
        for i in 0..3 {
            sink.append(&create_test_report(&format!("tag_{}", i))).unwrap();
        }

        let count = log_to_csv_and_archive(&log_path, &csv_path).unwrap();
        assert_eq!(count, 3);

        assert!(csv_path.exists());
        assert!(!log_path.exists());
        assert!(log_path.with_extension("jsonl.processed").exists());
    }

    #[test]
    fn test_log_to_csv_appends_across_rollups() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("reports.jsonl");
        let csv_path = temp_dir.path().join("reports.csv");

        let mut sink = JsonlSink::new(&log_path);
        sink.append(&create_test_report("first")).unwrap();
        assert_eq!(log_to_csv_and_archive(&log_path, &csv_path).unwrap(), 1);

        let mut sink = JsonlSink::new(&log_path);
        sink.append(&create_test_report("second")).unwrap();
        assert_eq!(log_to_csv_and_archive(&log_path, &csv_path).unwrap(), 1);

        let reader = csv::Reader::from_path(&csv_path).unwrap();
        assert_eq!(reader.into_records().count(), 2);
    }

    #[test]
    fn test_empty_log_is_noop() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("empty.jsonl");
        let csv_path = temp_dir.path().join("reports.csv");

        File::create(&log_path).unwrap();

        let count = log_to_csv_and_archive(&log_path, &csv_path).unwrap();
        assert_eq!(count, 0);
        assert!(!csv_path.exists());
    }

    #[test]
    fn test_cleanup_processed_logs() {
        let temp_dir = tempfile::tempdir().unwrap();

        File::create(temp_dir.path().join("r1.jsonl.processed")).unwrap();
        File::create(temp_dir.path().join("r2.jsonl.processed")).unwrap();
        File::create(temp_dir.path().join("keep.jsonl")).unwrap();

        let count = cleanup_processed_logs(temp_dir.path()).unwrap();
        assert_eq!(count, 2);
        assert!(temp_dir.path().join("keep.jsonl").exists());
    }
}

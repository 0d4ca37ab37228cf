//! Vitals CSV loader.
//!
//! Loads recorded vital signs from a CSV export to feed the insight
//! stub. Rows that fail to parse are skipped with a warning so one bad
//! record never hides an entire export.

use crate::{Result, VitalKind, VitalReading};
use chrono::{DateTime, Utc};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::path::Path;

/// CSV row format: `id,kind,value,unit,recorded_at`
#[derive(Debug, Deserialize)]
struct CsvRow {
    id: String,
    kind: String,
    value: String,
    unit: String,
    recorded_at: String,
}

impl TryFrom<CsvRow> for VitalReading {
    type Error = crate::Error;

    fn try_from(row: CsvRow) -> Result<Self> {
        let kind = VitalKind::parse(&row.kind)
            .ok_or_else(|| crate::Error::Other(format!("Unknown vital kind: {}", row.kind)))?;

        let recorded_at = DateTime::parse_from_rfc3339(&row.recorded_at)
            .map_err(|e| crate::Error::Other(format!("Invalid date: {}", e)))?
            .with_timezone(&Utc);

        Ok(VitalReading {
            id: row.id,
            kind,
            value: row.value,
            unit: row.unit,
            recorded_at,
        })
    }
}

/// Load all vital readings from a CSV file
pub fn load_vitals_from_csv(path: &Path) -> Result<Vec<VitalReading>> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;

    let mut readings = Vec::new();
    for result in reader.deserialize::<CsvRow>() {
        match result {
            Ok(row) => match VitalReading::try_from(row) {
                Ok(reading) => readings.push(reading),
                Err(e) => {
                    tracing::warn!("Failed to parse vitals row: {}", e);
                }
            },
            Err(e) => {
                tracing::warn!("Failed to deserialize vitals row: {}", e);
            }
        }
    }

    tracing::info!("Loaded {} vital readings from {:?}", readings.len(), path);

    Ok(readings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_vitals_from_csv() {
        let temp_dir = tempfile::tempdir().unwrap();
        let csv_path = temp_dir.path().join("vitals.csv");

        let csv = "\
id,kind,value,unit,recorded_at
v1,bp,128/82,mmHg,2025-08-01T08:00:00Z
v2,hr,72,bpm,2025-08-01T08:05:00Z
v3,bp,145/92,mmHg,2025-08-02T08:00:00Z
";
        std::fs::write(&csv_path, csv).unwrap();

        let readings = load_vitals_from_csv(&csv_path).unwrap();
        assert_eq!(readings.len(), 3);
        assert_eq!(readings[0].kind, VitalKind::BloodPressure);
        assert_eq!(readings[0].systolic(), Some(128));
        assert_eq!(readings[1].kind, VitalKind::HeartRate);
        assert_eq!(readings[2].systolic(), Some(145));
    }

    #[test]
    fn test_bad_rows_are_skipped() {
        let temp_dir = tempfile::tempdir().unwrap();
        let csv_path = temp_dir.path().join("vitals.csv");

        let csv = "\
id,kind,value,unit,recorded_at
v1,bp,128/82,mmHg,2025-08-01T08:00:00Z
v2,unknown_kind,9,units,2025-08-01T08:05:00Z
v3,hr,72,bpm,not-a-date
";
        std::fs::write(&csv_path, csv).unwrap();

        let readings = load_vitals_from_csv(&csv_path).unwrap();
        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].id, "v1");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = load_vitals_from_csv(&temp_dir.path().join("missing.csv"));
        assert!(result.is_err());
    }
}

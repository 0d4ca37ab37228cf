//! Core domain types for the Aegis health toolkit.
//!
//! This module defines the fundamental types used throughout the system:
//! - Chart geometry (canvas, points, wedges, bars)
//! - Symptom reports and duration buckets
//! - Assessment results and severity tiers
//! - Vital readings and insight results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Chart Geometry Types
// ============================================================================

/// Target drawing canvas for line and bar charts
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ChartArea {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
}

impl ChartArea {
    pub fn new(width: f64, height: f64, margin: f64) -> Self {
        Self {
            width,
            height,
            margin,
        }
    }

    /// Drawable width between the left and right margins
    pub fn inner_width(&self) -> f64 {
        self.width - self.margin * 2.0
    }

    /// Drawable height between the top and bottom margins
    pub fn inner_height(&self) -> f64 {
        self.height - self.margin * 2.0
    }
}

/// A single canvas coordinate
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlottedPoint {
    pub x: f64,
    pub y: f64,
}

/// A decimated axis label positioned along the horizontal baseline
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AxisLabel {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

/// Output of the line operation: polyline points (also used for
/// marker rendering) plus decimated baseline labels
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LineGeometry {
    pub points: Vec<PlottedPoint>,
    pub labels: Vec<AxisLabel>,
}

/// One (value, label, color) input triple for proportional charts
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CategorySlice {
    pub value: f64,
    pub label: String,
    pub color: String,
}

/// One angular segment of a donut chart
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Wedge {
    pub label: String,
    pub color: String,
    pub value: f64,
    /// Cumulative start angle in degrees, measured from 0°
    pub start_angle: f64,
    /// Angular sweep in degrees, proportional to value/total
    pub sweep_angle: f64,
    /// Arc endpoint flag for arc primitives: sweep exceeds 180°
    pub large_arc: bool,
    pub start: PlottedPoint,
    pub end: PlottedPoint,
    /// Rounded share of the total, for legend rendering
    pub percent: u32,
}

/// Output of the donut operation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DonutGeometry {
    pub center: PlottedPoint,
    pub radius: f64,
    pub total: f64,
    pub wedges: Vec<Wedge>,
}

/// One bar rectangle, anchored to the baseline and growing upward
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Bar {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub value: f64,
    pub label: String,
}

/// Output of the bar operation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BarGeometry {
    pub area: ChartArea,
    pub bars: Vec<Bar>,
}

// ============================================================================
// Symptom Report Types
// ============================================================================

/// Coarse ordered classification of how long symptoms have persisted
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum DurationBucket {
    UnderOneHour,
    OneToSixHours,
    SixToTwentyFourHours,
    OneToThreeDays,
    ThreeToSevenDays,
    OneToTwoWeeks,
    OverTwoWeeks,
}

impl DurationBucket {
    /// Whether this bucket counts as "long" for the classifier
    /// (day- or week-granularity durations)
    pub fn is_long(&self) -> bool {
        matches!(
            self,
            DurationBucket::OneToThreeDays
                | DurationBucket::ThreeToSevenDays
                | DurationBucket::OneToTwoWeeks
                | DurationBucket::OverTwoWeeks
        )
    }

    /// Human-readable form, matching the intake UI wording
    pub fn display(&self) -> &'static str {
        match self {
            DurationBucket::UnderOneHour => "Less than 1 hour",
            DurationBucket::OneToSixHours => "1-6 hours",
            DurationBucket::SixToTwentyFourHours => "6-24 hours",
            DurationBucket::OneToThreeDays => "1-3 days",
            DurationBucket::ThreeToSevenDays => "3-7 days",
            DurationBucket::OneToTwoWeeks => "1-2 weeks",
            DurationBucket::OverTwoWeeks => "2+ weeks",
        }
    }

    /// Parse a duration string leniently (intake wording or short forms)
    pub fn parse(s: &str) -> Option<Self> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "less than 1 hour" | "<1h" | "under_1h" | "under 1 hour" => {
                Some(DurationBucket::UnderOneHour)
            }
            "1-6 hours" | "1-6h" => Some(DurationBucket::OneToSixHours),
            "6-24 hours" | "6-24h" => Some(DurationBucket::SixToTwentyFourHours),
            "1-3 days" | "1-3d" => Some(DurationBucket::OneToThreeDays),
            "3-7 days" | "3-7d" => Some(DurationBucket::ThreeToSevenDays),
            "1-2 weeks" | "1-2w" => Some(DurationBucket::OneToTwoWeeks),
            "2+ weeks" | "2+w" | "over 2 weeks" => Some(DurationBucket::OverTwoWeeks),
            _ => None,
        }
    }
}

/// A recorded symptom report (one intake of the symptom checker)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SymptomReport {
    pub id: Uuid,
    pub tags: Vec<String>,
    /// Self-reported severity in [1, 10]
    pub severity: u8,
    pub duration: DurationBucket,
    pub reported_at: DateTime<Utc>,
    pub notes: Option<String>,
}

// ============================================================================
// Assessment Types
// ============================================================================

/// Discrete output tier of the rule-based assessment
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SeverityTier {
    Low,
    Medium,
    High,
}

impl SeverityTier {
    pub fn display(&self) -> &'static str {
        match self {
            SeverityTier::Low => "Low",
            SeverityTier::Medium => "Medium",
            SeverityTier::High => "High",
        }
    }
}

/// Result of one classifier invocation; immutable once produced
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Assessment {
    pub tier: SeverityTier,
    pub recommendation: String,
    pub actions: Vec<String>,
    /// Fixed per-rule confidence in [0, 1]
    pub confidence: f64,
    /// Present when recent history shares tags with this report
    pub pattern: Option<String>,
}

// ============================================================================
// Vitals and Insight Types
// ============================================================================

/// Kind of recorded vital sign
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VitalKind {
    BloodPressure,
    HeartRate,
    Weight,
    Temperature,
}

impl VitalKind {
    /// Parse the short codes used in vitals exports
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "bp" | "blood_pressure" => Some(VitalKind::BloodPressure),
            "hr" | "heart_rate" => Some(VitalKind::HeartRate),
            "weight" => Some(VitalKind::Weight),
            "temp" | "temperature" => Some(VitalKind::Temperature),
            _ => None,
        }
    }
}

/// One recorded vital sign measurement
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VitalReading {
    pub id: String,
    pub kind: VitalKind,
    /// Raw measurement text, e.g. "128/82" for blood pressure
    pub value: String,
    pub unit: String,
    pub recorded_at: DateTime<Utc>,
}

impl VitalReading {
    /// Systolic component of a blood-pressure reading ("SYS/DIA"),
    /// None for other kinds or unparseable values
    pub fn systolic(&self) -> Option<u16> {
        if self.kind != VitalKind::BloodPressure {
            return None;
        }
        self.value
            .split('/')
            .next()
            .and_then(|s| s.trim().parse().ok())
    }
}

/// The person a set of vitals belongs to
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SubjectProfile {
    pub id: String,
    pub name: String,
    pub age: Option<u32>,
}

/// Risk level reported by the vitals insight stub
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    High,
}

/// Result of the vitals insight stub
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VitalInsight {
    pub risk_level: RiskLevel,
    pub recommendations: Vec<String>,
    pub predicted_trends: String,
    pub confidence: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_parse_intake_wording() {
        assert_eq!(
            DurationBucket::parse("Less than 1 hour"),
            Some(DurationBucket::UnderOneHour)
        );
        assert_eq!(
            DurationBucket::parse("1-3 days"),
            Some(DurationBucket::OneToThreeDays)
        );
        assert_eq!(
            DurationBucket::parse("2+ weeks"),
            Some(DurationBucket::OverTwoWeeks)
        );
        assert_eq!(DurationBucket::parse("forever"), None);
    }

    #[test]
    fn test_duration_long_buckets() {
        assert!(!DurationBucket::UnderOneHour.is_long());
        assert!(!DurationBucket::SixToTwentyFourHours.is_long());
        assert!(DurationBucket::OneToThreeDays.is_long());
        assert!(DurationBucket::OneToTwoWeeks.is_long());
        assert!(DurationBucket::OverTwoWeeks.is_long());
    }

    #[test]
    fn test_duration_buckets_ordered() {
        assert!(DurationBucket::UnderOneHour < DurationBucket::OneToSixHours);
        assert!(DurationBucket::OneToTwoWeeks < DurationBucket::OverTwoWeeks);
    }

    #[test]
    fn test_systolic_parse() {
        let reading = VitalReading {
            id: "r1".into(),
            kind: VitalKind::BloodPressure,
            value: "145/92".into(),
            unit: "mmHg".into(),
            recorded_at: Utc::now(),
        };
        assert_eq!(reading.systolic(), Some(145));
    }

    #[test]
    fn test_systolic_none_for_other_kinds() {
        let reading = VitalReading {
            id: "r2".into(),
            kind: VitalKind::HeartRate,
            value: "72".into(),
            unit: "bpm".into(),
            recorded_at: Utc::now(),
        };
        assert_eq!(reading.systolic(), None);
    }

    #[test]
    fn test_vital_kind_parse() {
        assert_eq!(VitalKind::parse("bp"), Some(VitalKind::BloodPressure));
        assert_eq!(VitalKind::parse("HR"), Some(VitalKind::HeartRate));
        assert_eq!(VitalKind::parse("unknown"), None);
    }
}

//! Vitals-based insight stub.
//!
//! A deliberately static stand-in for a predictive model: apart from
//! the systolic blood-pressure check, every field of the result is a
//! fixed constant. Kept literal on purpose so output stays in parity
//! with the product behavior it replaces; do not extend this into a
//! real model without a decision on the backend integration.

use crate::{RiskLevel, SubjectProfile, VitalInsight, VitalReading};

/// Systolic threshold above which the stub reports high risk
const SYSTOLIC_RISK_THRESHOLD: u16 = 140;

const RECOMMENDATIONS: [&str; 3] = [
    "Monitor blood pressure regularly",
    "Consider reducing sodium intake",
    "Increase physical activity gradually",
];

const PREDICTED_TRENDS: &str =
    "Blood pressure may increase by 5% over the next month based on current patterns";

const CONFIDENCE: f64 = 0.87;

/// Produce the fixed insight for a set of recorded vitals.
///
/// Risk is "high" iff any blood-pressure reading's systolic component
/// exceeds 140; everything else in the result is constant, including
/// the 0.87 confidence.
pub fn vitals_insight(vitals: &[VitalReading], profile: &SubjectProfile) -> VitalInsight {
    let risk_level = if vitals
        .iter()
        .filter_map(|v| v.systolic())
        .any(|systolic| systolic > SYSTOLIC_RISK_THRESHOLD)
    {
        RiskLevel::High
    } else {
        RiskLevel::Low
    };

    tracing::info!(
        subject = %profile.name,
        readings = vitals.len(),
        ?risk_level,
        "Generated vitals insight"
    );

    VitalInsight {
        risk_level,
        recommendations: RECOMMENDATIONS.iter().map(|r| r.to_string()).collect(),
        predicted_trends: PREDICTED_TRENDS.into(),
        confidence: CONFIDENCE,
    }
}

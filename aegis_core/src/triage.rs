//! Rule-based symptom assessment engine.
//!
//! Deterministic classification of a symptom report into a severity
//! tier using a fixed, priority-ordered decision table. First match
//! wins; no network calls, no randomness. A rolling report history
//! only influences the pattern annotation, never the tier.

use crate::{Assessment, DurationBucket, Error, Result, SeverityTier, SymptomReport};
use chrono::{DateTime, Duration, Utc};

/// History window for pattern recognition, in days
const PATTERN_WINDOW_DAYS: i64 = 7;

const HIGH_RECOMMENDATION: &str =
    "Seek immediate medical attention. Your symptoms may indicate a serious condition.";
const HIGH_ACTIONS: [&str; 3] = [
    "Call emergency services",
    "Contact your cardiologist",
    "Monitor vital signs",
];
const HIGH_CONFIDENCE: f64 = 0.92;

const MEDIUM_RECOMMENDATION: &str =
    "Monitor symptoms closely and consider contacting your healthcare provider.";
const MEDIUM_ACTIONS: [&str; 4] = [
    "Rest in a quiet, dark room",
    "Stay hydrated",
    "Track symptom patterns",
    "Consider OTC pain relief",
];
const MEDIUM_CONFIDENCE: f64 = 0.78;

const LOW_RECOMMENDATION: &str =
    "Continue monitoring. Consider home care remedies and lifestyle adjustments.";
const LOW_ACTIONS: [&str; 4] = [
    "Rest and hydration",
    "Over-the-counter relief if needed",
    "Monitor for changes",
    "Maintain regular sleep schedule",
];
const LOW_CONFIDENCE: f64 = 0.65;

/// Classify a symptom report into a severity tier.
///
/// ## Decision table (first match wins)
///
/// 1. Cardiac tag (contains "chest pain" or "heart"), OR severity ≥ 8
///    with a long duration → High, confidence 0.92
/// 2. Headache/dizziness tag, OR severity ≥ 6 with a long duration
///    → Medium, confidence 0.78
/// 3. Everything else → Low, confidence 0.65
///
/// "Long" means a day- or week-granularity duration bucket. Tag rules
/// fire regardless of severity and duration.
///
/// `history` entries within the trailing 7 days of `now` that share a
/// tag with this report produce a pattern note; otherwise the note is
/// `None`.
///
/// Severity outside [1, 10] is rejected here so the rules below can
/// assume validated input.
pub fn assess(
    tags: &[String],
    severity: u8,
    duration: DurationBucket,
    history: &[SymptomReport],
    now: DateTime<Utc>,
) -> Result<Assessment> {
    if !(1..=10).contains(&severity) {
        return Err(Error::InvalidInput(format!(
            "severity {} outside the 1-10 scale",
            severity
        )));
    }

    let recent_similar = count_recent_similar(tags, history, now);

    let high_severity = severity >= 8;
    let long_duration = duration.is_long();

    let assessment = if has_cardiac_tag(tags) || (high_severity && long_duration) {
        tracing::info!(severity, ?duration, "Triage matched High rule");
        Assessment {
            tier: SeverityTier::High,
            recommendation: HIGH_RECOMMENDATION.into(),
            actions: owned(&HIGH_ACTIONS),
            confidence: HIGH_CONFIDENCE,
            pattern: (recent_similar > 0).then(|| {
                format!("Similar symptoms reported {} times recently", recent_similar)
            }),
        }
    } else if has_neuro_tag(tags) || (severity >= 6 && long_duration) {
        tracing::info!(severity, ?duration, "Triage matched Medium rule");
        Assessment {
            tier: SeverityTier::Medium,
            recommendation: MEDIUM_RECOMMENDATION.into(),
            actions: owned(&MEDIUM_ACTIONS),
            confidence: MEDIUM_CONFIDENCE,
            pattern: (recent_similar > 0).then(|| "Recurring pattern detected".to_string()),
        }
    } else {
        tracing::info!(severity, ?duration, "Triage fell through to Low rule");
        Assessment {
            tier: SeverityTier::Low,
            recommendation: LOW_RECOMMENDATION.into(),
            actions: owned(&LOW_ACTIONS),
            confidence: LOW_CONFIDENCE,
            pattern: (recent_similar > 0).then(|| "Mild recurring symptoms".to_string()),
        }
    };

    Ok(assessment)
}

/// Count history entries in the trailing window that share any tag
/// with the current report
fn count_recent_similar(tags: &[String], history: &[SymptomReport], now: DateTime<Utc>) -> usize {
    let cutoff = now - Duration::days(PATTERN_WINDOW_DAYS);
    history
        .iter()
        .filter(|report| report.reported_at > cutoff)
        .filter(|report| report.tags.iter().any(|t| tags.contains(t)))
        .count()
}

fn has_cardiac_tag(tags: &[String]) -> bool {
    tags.iter().any(|t| {
        let tag = t.to_lowercase();
        tag.contains("chest pain") || tag.contains("heart")
    })
}

fn has_neuro_tag(tags: &[String]) -> bool {
    tags.iter().any(|t| {
        let tag = t.to_lowercase();
        tag.contains("headache") || tag.contains("dizziness")
    })
}

fn owned(actions: &[&str]) -> Vec<String> {
    actions.iter().map(|a| a.to_string()).collect()
}

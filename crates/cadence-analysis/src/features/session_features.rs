//! Session feature vectors.

use cadence_core::models::{RiskLevel, TherapySession};
use chrono::{Datelike, Timelike};

use super::FeatureMatrix;

/// Columns produced by [`session_features`].
pub const SESSION_FEATURES: [&str; 7] = [
    "duration_hours",
    "time_of_day",
    "day_of_week",
    "risk_score",
    "emotion_count",
    "technique_count",
    "transcript_length",
];

/// Columns produced by [`mining_features`].
pub const MINING_FEATURES: [&str; 5] = [
    "duration_minutes",
    "emotional_complexity",
    "technique_count",
    "transcript_length",
    "critical_risk",
];

/// Unannotated sessions score like `low`.
fn risk_score(session: &TherapySession) -> f64 {
    session.risk_level().map_or(RiskLevel::Low.score(), RiskLevel::score)
}

/// One row per session, in input order. Empty input gives an empty matrix.
pub fn session_features(sessions: &[TherapySession]) -> FeatureMatrix {
    let mut matrix = FeatureMatrix::new(&SESSION_FEATURES);
    for session in sessions {
        let start = session.start_time;
        let time_of_day = (start.hour() as f64 + start.minute() as f64 / 60.0) / 24.0;
        let day_of_week = start.weekday().num_days_from_monday() as f64 / 6.0;
        matrix.push(
            session.id.clone(),
            vec![
                session.duration_hours(),
                time_of_day,
                day_of_week,
                risk_score(session),
                session.distinct_emotion_count() as f64,
                session.techniques().len() as f64,
                session.transcript_words() as f64,
            ],
        );
    }
    matrix
}

/// Features the cross-session miner clusters on (not yet standardized).
pub fn mining_features(sessions: &[TherapySession]) -> FeatureMatrix {
    let mut matrix = FeatureMatrix::new(&MINING_FEATURES);
    for session in sessions {
        let critical = matches!(session.risk_level(), Some(RiskLevel::Critical));
        matrix.push(
            session.id.clone(),
            vec![
                session.duration_minutes(),
                session.distinct_emotion_count() as f64,
                session.techniques().len() as f64,
                session.transcript_words() as f64,
                if critical { 1.0 } else { 0.0 },
            ],
        );
    }
    matrix
}

//! The four session pattern detectors.
//!
//! Every detector shares one test interface: given the chronologically
//! ordered sessions and their [`session_features`](crate::features::session_features)
//! matrix, produce at most one [`DetectorFinding`]. Numeric series are read
//! from the matrix columns; technique names are categorical and come from the
//! sessions. The builder turns findings into `PatternRecognitionResult` records.

use cadence_core::config::AnalysisConfig;
use cadence_core::models::{PatternType, Significance, TherapySession, TrendDirection, Urgency};
use cadence_core::types::collections::BTreeMap;

use super::trend::determine_trend;
use crate::features::FeatureMatrix;
use crate::stats::{mean, variance};

/// Supporting observations `k` out of `n` tested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evidence {
    pub successes: usize,
    pub total: usize,
}

/// Raw result of one detector's statistical test.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectorFinding {
    pub pattern_type: PatternType,
    pub kind: String,
    pub description: String,
    /// The per-session series the test ran on.
    pub series: Vec<f64>,
    /// Indices of contributing sessions.
    pub supporting: Vec<usize>,
    pub evidence: Evidence,
    pub significance: Significance,
    pub recommendation: String,
    pub intervention_suggested: bool,
    pub urgency: Urgency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternDetector {
    Behavioral,
    Emotional,
    Cognitive,
    Communication,
}

impl PatternDetector {
    /// Fixed sweep order; results are collected in this order.
    pub const ALL: [PatternDetector; 4] = [
        Self::Behavioral,
        Self::Emotional,
        Self::Cognitive,
        Self::Communication,
    ];

    pub fn pattern_type(&self) -> PatternType {
        match self {
            Self::Behavioral => PatternType::Behavioral,
            Self::Emotional => PatternType::Emotional,
            Self::Cognitive => PatternType::Cognitive,
            Self::Communication => PatternType::Communication,
        }
    }

    pub fn name(&self) -> &'static str {
        self.pattern_type().name()
    }

    /// Run this detector over `sessions` (ordered by start time) and the
    /// feature matrix extracted from them, row for row.
    pub fn run_test(
        &self,
        sessions: &[TherapySession],
        features: &FeatureMatrix,
        config: &AnalysisConfig,
    ) -> Option<DetectorFinding> {
        let required = config.effective_min_records();
        if sessions.len() < required {
            tracing::warn!(
                detector = self.name(),
                records = sessions.len(),
                required,
                "too few sessions for pattern detection"
            );
            return None;
        }
        if features.len() != sessions.len() {
            tracing::warn!(
                detector = self.name(),
                records = sessions.len(),
                rows = features.len(),
                "feature rows do not match sessions"
            );
            return None;
        }
        let finding = match self {
            Self::Behavioral => behavioral(features),
            Self::Emotional => emotional(features, config),
            Self::Cognitive => cognitive(sessions, config),
            Self::Communication => communication(features, config),
        };
        tracing::debug!(detector = self.name(), found = finding.is_some(), "detector finished");
        finding
    }
}

fn behavioral(features: &FeatureMatrix) -> Option<DetectorFinding> {
    let durations: Vec<f64> = features
        .column_by_name("duration_hours")?
        .into_iter()
        .map(|hours| hours * 60.0)
        .collect();
    let m = mean(&durations);
    let var = variance(&durations);
    if var <= 0.5 * m {
        return None;
    }

    let deviating = durations
        .iter()
        .filter(|d| m > 0.0 && ((*d - m) / m).abs() > 0.25)
        .count();
    let high = var > m;
    let (significance, urgency, recommendation) = if high {
        (
            Significance::High,
            Urgency::Medium,
            "Session lengths vary widely; review scheduling and engagement with the client",
        )
    } else {
        (
            Significance::Medium,
            Urgency::Low,
            "Monitor session length consistency over the next sessions",
        )
    };

    Some(DetectorFinding {
        pattern_type: PatternType::Behavioral,
        kind: "session-duration-variability".to_string(),
        description: format!(
            "Session duration varies considerably (mean {m:.1} min, variance {var:.1})"
        ),
        supporting: (0..durations.len()).collect(),
        evidence: Evidence {
            successes: deviating,
            total: durations.len(),
        },
        series: durations,
        significance,
        recommendation: recommendation.to_string(),
        intervention_suggested: high,
        urgency,
    })
}

fn emotional(features: &FeatureMatrix, config: &AnalysisConfig) -> Option<DetectorFinding> {
    let counts = features.column_by_name("emotion_count")?;
    let trend = determine_trend(&counts, config.effective_trend_slope_threshold());
    if trend.direction != TrendDirection::Decreasing {
        return None;
    }

    let steps = counts.windows(2).filter(|w| w[1] <= w[0]).count();
    Some(DetectorFinding {
        pattern_type: PatternType::Emotional,
        kind: "emotional-regulation-improvement".to_string(),
        description: "Emotional regulation improving: fewer distinct emotional states per session"
            .to_string(),
        supporting: (0..counts.len()).collect(),
        evidence: Evidence {
            successes: 1 + steps,
            total: counts.len(),
        },
        series: counts,
        significance: Significance::High,
        recommendation: "Reinforce the regulation strategies currently in use".to_string(),
        intervention_suggested: false,
        urgency: Urgency::None,
    })
}

fn cognitive(sessions: &[TherapySession], config: &AnalysisConfig) -> Option<DetectorFinding> {
    let mut tally: BTreeMap<String, usize> = BTreeMap::new();
    let mut per_session: Vec<Vec<String>> = Vec::with_capacity(sessions.len());
    for session in sessions {
        let names: Vec<String> = session
            .techniques()
            .iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        for name in &names {
            *tally.entry(name.clone()).or_default() += 1;
        }
        per_session.push(names);
    }

    let total: usize = tally.values().sum();
    if total == 0 {
        return None;
    }
    // BTreeMap iterates by name, so ties resolve to the smallest name.
    let (top, count) = tally
        .iter()
        .fold(None::<(&String, usize)>, |best, (name, &c)| match best {
            Some((_, bc)) if bc >= c => best,
            _ => Some((name, c)),
        })?;
    let share = count as f64 / total as f64;
    if share < config.effective_dominance_threshold() {
        return None;
    }

    let supporting: Vec<usize> = per_session
        .iter()
        .enumerate()
        .filter(|(_, names)| names.contains(top))
        .map(|(i, _)| i)
        .collect();
    let series = per_session
        .iter()
        .map(|names| names.iter().filter(|n| *n == top).count() as f64)
        .collect();

    Some(DetectorFinding {
        pattern_type: PatternType::Cognitive,
        kind: "dominant-technique".to_string(),
        description: format!(
            "Technique '{top}' dominates treatment ({:.0}% of technique mentions)",
            share * 100.0
        ),
        series,
        supporting,
        evidence: Evidence {
            successes: count,
            total,
        },
        significance: Significance::Medium,
        recommendation: format!("Consider complementing '{top}' with other evidence-based techniques"),
        intervention_suggested: false,
        urgency: Urgency::Low,
    })
}

fn communication(features: &FeatureMatrix, config: &AnalysisConfig) -> Option<DetectorFinding> {
    let words = features.column_by_name("transcript_length")?;
    let trend = determine_trend(&words, config.effective_trend_slope_threshold());
    if trend.direction != TrendDirection::Increasing {
        return None;
    }

    let steps = words.windows(2).filter(|w| w[1] >= w[0]).count();
    Some(DetectorFinding {
        pattern_type: PatternType::Communication,
        kind: "increasing-engagement".to_string(),
        description: "Client communication is increasing: transcripts grow longer over time"
            .to_string(),
        supporting: (0..words.len()).collect(),
        evidence: Evidence {
            successes: 1 + steps,
            total: words.len(),
        },
        series: words,
        significance: Significance::Medium,
        recommendation: "Build on the client's growing openness in session".to_string(),
        intervention_suggested: false,
        urgency: Urgency::None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::session_features;
    use cadence_core::models::SessionAnnotations;
    use chrono::{Duration, TimeZone, Utc};

    fn session(day: i64, minutes: i64, emotions: &[&str], techniques: &[&str], words: usize) -> TherapySession {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap() + Duration::days(day);
        TherapySession {
            id: format!("s{day}"),
            start_time: start,
            end_time: start + Duration::minutes(minutes),
            transcript: vec!["word"; words].join(" "),
            annotations: Some(SessionAnnotations {
                risk_level: None,
                emotional_states: emotions.iter().map(|s| s.to_string()).collect(),
                techniques: techniques.iter().map(|s| s.to_string()).collect(),
            }),
        }
    }

    #[test]
    fn test_too_few_sessions() {
        let sessions = vec![session(0, 30, &[], &[], 10)];
        let features = session_features(&sessions);
        for detector in PatternDetector::ALL {
            assert!(detector
                .run_test(&sessions, &features, &AnalysisConfig::default())
                .is_none());
        }
    }

    #[test]
    fn test_behavioral_high() {
        let sessions = vec![
            session(0, 30, &[], &[], 0),
            session(7, 90, &[], &[], 0),
            session(14, 45, &[], &[], 0),
        ];
        let f = PatternDetector::Behavioral
            .run_test(&sessions, &session_features(&sessions), &AnalysisConfig::default())
            .unwrap();
        assert_eq!(f.significance, Significance::High);
        assert!(f.intervention_suggested);
        assert_eq!(f.evidence, Evidence { successes: 2, total: 3 });
    }

    #[test]
    fn test_behavioral_steady_none() {
        let sessions = vec![session(0, 50, &[], &[], 0), session(7, 51, &[], &[], 0)];
        assert!(PatternDetector::Behavioral
            .run_test(&sessions, &session_features(&sessions), &AnalysisConfig::default())
            .is_none());
    }

    #[test]
    fn test_emotional_decreasing() {
        let sessions = vec![
            session(0, 50, &["a", "b", "c", "d"], &[], 0),
            session(7, 50, &["a", "b"], &[], 0),
            session(14, 50, &["a"], &[], 0),
        ];
        let f = PatternDetector::Emotional
            .run_test(&sessions, &session_features(&sessions), &AnalysisConfig::default())
            .unwrap();
        assert_eq!(f.kind, "emotional-regulation-improvement");
        assert!(!f.intervention_suggested);
        assert_eq!(f.evidence, Evidence { successes: 3, total: 3 });
    }

    #[test]
    fn test_cognitive_dominant() {
        let sessions = vec![
            session(0, 50, &[], &["cbt", "cbt"], 0),
            session(7, 50, &[], &["cbt", "dbt"], 0),
            session(14, 50, &[], &["CBT"], 0),
        ];
        let f = PatternDetector::Cognitive
            .run_test(&sessions, &session_features(&sessions), &AnalysisConfig::default())
            .unwrap();
        assert!(f.description.contains("cbt"));
        assert_eq!(f.supporting, vec![0, 1, 2]);
        assert_eq!(f.evidence, Evidence { successes: 4, total: 5 });
    }

    #[test]
    fn test_cognitive_no_dominance() {
        let sessions = vec![
            session(0, 50, &[], &["cbt", "dbt"], 0),
            session(7, 50, &[], &["act"], 0),
        ];
        assert!(PatternDetector::Cognitive
            .run_test(&sessions, &session_features(&sessions), &AnalysisConfig::default())
            .is_none());
    }

    #[test]
    fn test_communication_increasing() {
        let sessions = vec![
            session(0, 50, &[], &[], 100),
            session(7, 50, &[], &[], 200),
            session(14, 50, &[], &[], 400),
        ];
        let f = PatternDetector::Communication
            .run_test(&sessions, &session_features(&sessions), &AnalysisConfig::default())
            .unwrap();
        assert_eq!(f.significance, Significance::Medium);
        assert!(!f.intervention_suggested);
    }

    #[test]
    fn test_series_come_from_feature_columns() {
        let sessions = vec![
            session(0, 30, &["a", "b", "c", "d"], &[], 100),
            session(7, 90, &["a", "b"], &[], 200),
            session(14, 45, &["a"], &[], 400),
        ];
        let features = session_features(&sessions);
        let config = AnalysisConfig::default();

        let hours = features.column_by_name("duration_hours").unwrap();
        let behavioral = PatternDetector::Behavioral
            .run_test(&sessions, &features, &config)
            .unwrap();
        assert_eq!(behavioral.series, hours.iter().map(|h| h * 60.0).collect::<Vec<_>>());
        assert_eq!(behavioral.series, vec![30.0, 90.0, 45.0]);

        let emotional = PatternDetector::Emotional
            .run_test(&sessions, &features, &config)
            .unwrap();
        assert_eq!(Some(emotional.series), features.column_by_name("emotion_count"));

        let communication = PatternDetector::Communication
            .run_test(&sessions, &features, &config)
            .unwrap();
        assert_eq!(Some(communication.series), features.column_by_name("transcript_length"));
    }

    #[test]
    fn test_mismatched_feature_rows() {
        let sessions = vec![
            session(0, 30, &[], &[], 0),
            session(7, 90, &[], &[], 0),
            session(14, 45, &[], &[], 0),
        ];
        let features = session_features(&sessions[..2]);
        for detector in PatternDetector::ALL {
            assert!(detector
                .run_test(&sessions, &features, &AnalysisConfig::default())
                .is_none());
        }
    }
}

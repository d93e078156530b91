//! Therapy session records, supplied by the external session store.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Qualitative risk level from the AI annotation bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Numeric score: critical 1.0, high 0.75, medium 0.5, anything else 0.25.
    pub fn score(self) -> f64 {
        match self {
            Self::Critical => 1.0,
            Self::High => 0.75,
            Self::Medium => 0.5,
            Self::Low => 0.25,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Optional AI annotations attached to a session.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionAnnotations {
    pub risk_level: Option<RiskLevel>,
    pub emotional_states: Vec<String>,
    pub techniques: Vec<String>,
}

/// A completed therapy session. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TherapySession {
    pub id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub transcript: String,
    #[serde(default)]
    pub annotations: Option<SessionAnnotations>,
}

impl TherapySession {
    /// Session length in minutes; an end before the start counts as zero.
    pub fn duration_minutes(&self) -> f64 {
        let secs = (self.end_time - self.start_time).num_seconds().max(0);
        secs as f64 / 60.0
    }

    pub fn duration_hours(&self) -> f64 {
        self.duration_minutes() / 60.0
    }

    pub fn risk_level(&self) -> Option<RiskLevel> {
        self.annotations.as_ref().and_then(|a| a.risk_level)
    }

    pub fn emotional_states(&self) -> &[String] {
        self.annotations
            .as_ref()
            .map(|a| a.emotional_states.as_slice())
            .unwrap_or(&[])
    }

    pub fn techniques(&self) -> &[String] {
        self.annotations
            .as_ref()
            .map(|a| a.techniques.as_slice())
            .unwrap_or(&[])
    }

    /// Number of distinct emotional states (case-insensitive).
    pub fn distinct_emotion_count(&self) -> usize {
        let mut states: Vec<String> = self
            .emotional_states()
            .iter()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        states.sort();
        states.dedup();
        states.len()
    }

    /// Transcript length in whitespace-separated words.
    pub fn transcript_words(&self) -> usize {
        self.transcript.split_whitespace().count()
    }
}

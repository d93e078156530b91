//! In-memory provider for tests and embedding hosts that already hold data.

use chrono::{DateTime, Utc};

use crate::errors::ProviderError;
use crate::models::{EmotionAnalysis, HistoricalSeries, TherapySession};
use crate::types::collections::FxHashMap;

use super::providers::{EmotionAnalysisProvider, SessionHistoryProvider, TimeSeriesProvider};

/// Holds per-client records and answers every provider trait from them.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProvider {
    sessions: FxHashMap<String, Vec<TherapySession>>,
    analyses: FxHashMap<String, Vec<EmotionAnalysis>>,
    series: FxHashMap<String, Vec<HistoricalSeries>>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sessions(mut self, client_id: &str, sessions: Vec<TherapySession>) -> Self {
        self.sessions.insert(client_id.to_string(), sessions);
        self
    }

    pub fn with_analyses(mut self, client_id: &str, analyses: Vec<EmotionAnalysis>) -> Self {
        self.analyses.insert(client_id.to_string(), analyses);
        self
    }

    pub fn with_series(mut self, client_id: &str, series: Vec<HistoricalSeries>) -> Self {
        self.series.insert(client_id.to_string(), series);
        self
    }

    fn not_found(client_id: &str) -> ProviderError {
        ProviderError::NotFound {
            client_id: client_id.to_string(),
        }
    }
}

impl SessionHistoryProvider for InMemoryProvider {
    async fn fetch_sessions(
        &self,
        client_id: &str,
        session_ids: &[String],
    ) -> Result<Vec<TherapySession>, ProviderError> {
        let all = self
            .sessions
            .get(client_id)
            .ok_or_else(|| Self::not_found(client_id))?;
        let mut selected: Vec<TherapySession> = all
            .iter()
            .filter(|s| session_ids.is_empty() || session_ids.contains(&s.id))
            .cloned()
            .collect();
        selected.sort_by_key(|s| s.start_time);
        Ok(selected)
    }
}

impl EmotionAnalysisProvider for InMemoryProvider {
    async fn fetch_analyses(
        &self,
        client_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<EmotionAnalysis>, ProviderError> {
        let all = self
            .analyses
            .get(client_id)
            .ok_or_else(|| Self::not_found(client_id))?;
        let mut selected: Vec<EmotionAnalysis> = all
            .iter()
            .filter(|a| a.timestamp >= start && a.timestamp <= end)
            .cloned()
            .collect();
        selected.sort_by_key(|a| a.timestamp);
        Ok(selected)
    }
}

impl TimeSeriesProvider for InMemoryProvider {
    async fn fetch_series(
        &self,
        client_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<HistoricalSeries>, ProviderError> {
        let all = self
            .series
            .get(client_id)
            .ok_or_else(|| Self::not_found(client_id))?;
        Ok(all
            .iter()
            .map(|series| {
                let mut points: Vec<_> = series
                    .points
                    .iter()
                    .filter(|p| p.timestamp >= start && p.timestamp <= end)
                    .copied()
                    .collect();
                points.sort_by_key(|p| p.timestamp);
                HistoricalSeries::new(series.indicator.clone(), points)
            })
            .collect())
    }
}

//! External data providers.
//!
//! The core never fetches on its own; timeouts, retries, and backoff live
//! behind these traits.

use chrono::{DateTime, Utc};

use crate::errors::ProviderError;
use crate::models::{EmotionAnalysis, HistoricalSeries, TherapySession};

/// Session-history store.
#[allow(async_fn_in_trait)]
pub trait SessionHistoryProvider: Send + Sync {
    /// Fetch the given sessions for a client, ordered by start time.
    async fn fetch_sessions(
        &self,
        client_id: &str,
        session_ids: &[String],
    ) -> Result<Vec<TherapySession>, ProviderError>;
}

/// Emotion-inference pipeline output.
#[allow(async_fn_in_trait)]
pub trait EmotionAnalysisProvider: Send + Sync {
    /// Fetch analyses with `start <= timestamp <= end`, ordered by timestamp.
    async fn fetch_analyses(
        &self,
        client_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<EmotionAnalysis>, ProviderError>;
}

/// Historical numeric indicators (assessment scores, mood ratings, ...).
#[allow(async_fn_in_trait)]
pub trait TimeSeriesProvider: Send + Sync {
    /// Fetch one ordered series per indicator, restricted to `[start, end]`.
    async fn fetch_series(
        &self,
        client_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<HistoricalSeries>, ProviderError>;
}

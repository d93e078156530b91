//! PatternEngine: the public entry points of the analytic core.
//!
//! Every entry point takes the caller's `AnalysisContext`, runs under a
//! child `cadence.operation` span, and never fails: errors are logged and
//! returned inside `AnalysisOutcome::Degraded` next to an empty or fallback
//! value.

use cadence_core::config::CadenceConfig;
use cadence_core::errors::{AnalysisError, CadenceErrorCode};
use cadence_core::models::{
    AnalysisOutcome, CrossSessionPattern, EmotionAnalysis, HistoricalSeries, PatternComparison,
    PatternRecognitionResult, RiskCorrelation, TherapySession, TrendPattern,
};
use cadence_core::traits::{EmotionAnalysisProvider, SessionHistoryProvider, TimeSeriesProvider};
use cadence_core::AnalysisContext;
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use tracing::{info, Instrument};

use crate::correlation::{analyze_correlations, fallback_correlation};
use crate::cross_session::mine_cross_session_patterns;
use crate::features::{session_features, FeatureMatrix};
use crate::patterns::{build_pattern, compare_pattern_sets, validate_patterns, PatternDetector};
use crate::trends::analyze_series;

/// Stateless apart from its configuration; share freely across tasks.
#[derive(Debug, Clone, Default)]
pub struct PatternEngine {
    config: CadenceConfig,
}

fn report(err: &AnalysisError) {
    match err {
        AnalysisError::Computation { .. } | AnalysisError::DataUnavailable(_) => {
            tracing::error!(code = err.error_code(), error = %err, "analysis degraded");
        }
        AnalysisError::InsufficientData { .. } | AnalysisError::InvalidInput { .. } => {
            tracing::warn!(code = err.error_code(), error = %err, "analysis degraded");
        }
    }
}

fn degraded_empty<T: Default>(err: AnalysisError) -> AnalysisOutcome<T> {
    report(&err);
    AnalysisOutcome::empty(err)
}

/// A computation failure carries the `correlation_unavailable` fallback
/// record; other failures degrade to an empty list.
fn correlation_outcome(
    analyses: &[EmotionAnalysis],
    result: Result<Vec<RiskCorrelation>, AnalysisError>,
) -> AnalysisOutcome<Vec<RiskCorrelation>> {
    match result {
        Ok(correlations) => {
            info!(
                analyses = analyses.len(),
                correlations = correlations.len(),
                "risk factor correlations complete"
            );
            AnalysisOutcome::Complete(correlations)
        }
        Err(err @ AnalysisError::Computation { .. }) => {
            report(&err);
            AnalysisOutcome::degraded(vec![fallback_correlation(analyses)], err)
        }
        Err(err) => degraded_empty(err),
    }
}

fn chronological(sessions: &[TherapySession]) -> Vec<TherapySession> {
    let mut sorted = sessions.to_vec();
    sorted.sort_by(|a, b| a.start_time.cmp(&b.start_time).then_with(|| a.id.cmp(&b.id)));
    sorted
}

fn check_range(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<(), AnalysisError> {
    if start > end {
        return Err(AnalysisError::invalid_input(format!(
            "range start {start} is after end {end}"
        )));
    }
    Ok(())
}

impl PatternEngine {
    pub fn new(config: CadenceConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::default()
    }

    pub fn config(&self) -> &CadenceConfig {
        &self.config
    }

    /// Run all four detectors in parallel; results keep detector order.
    fn run_detectors(
        &self,
        sessions: &[TherapySession],
        features: &FeatureMatrix,
    ) -> Vec<PatternRecognitionResult> {
        let span = tracing::Span::current();
        let config = &self.config.analysis;
        let found: Vec<Option<PatternRecognitionResult>> = PatternDetector::ALL
            .as_slice()
            .par_iter()
            .map(|detector| {
                span.in_scope(|| {
                    detector
                        .run_test(sessions, features, config)
                        .and_then(|finding| build_pattern(&finding, sessions, config))
                })
            })
            .collect();
        found.into_iter().flatten().collect()
    }

    fn sweep(
        &self,
        sessions: &[TherapySession],
    ) -> AnalysisOutcome<Vec<PatternRecognitionResult>> {
        let required = self.config.analysis.effective_min_records();
        if sessions.len() < required {
            return degraded_empty(AnalysisError::insufficient(
                "pattern detection",
                required,
                sessions.len(),
            ));
        }
        let sessions = chronological(sessions);
        let features = session_features(&sessions);
        if let Err(err) = features.validate() {
            return degraded_empty(err);
        }
        let patterns = self.run_detectors(&sessions, &features);
        info!(sessions = sessions.len(), patterns = patterns.len(), "detector sweep complete");
        AnalysisOutcome::Complete(patterns)
    }

    /// Raw detector sweep over `sessions`, without the confidence gate.
    pub fn analyze_session_patterns(
        &self,
        ctx: &AnalysisContext,
        sessions: &[TherapySession],
    ) -> AnalysisOutcome<Vec<PatternRecognitionResult>> {
        let span = ctx.operation_span("analyze_session_patterns");
        let _entered = span.enter();
        self.sweep(sessions)
    }

    /// Detector sweep followed by validation against the minimum confidence.
    pub fn detect_cross_session_patterns(
        &self,
        ctx: &AnalysisContext,
        sessions: &[TherapySession],
    ) -> AnalysisOutcome<Vec<PatternRecognitionResult>> {
        let span = ctx.operation_span("detect_cross_session_patterns");
        let _entered = span.enter();
        let min_confidence = self.config.analysis.effective_min_pattern_confidence();
        self.sweep(sessions)
            .map(|patterns| validate_patterns(patterns, min_confidence))
    }

    /// Partition two pattern sets into merged common patterns and the
    /// unmatched remainder of each. Commutative on `common`.
    pub fn compare_patterns(
        &self,
        set_a: &[PatternRecognitionResult],
        set_b: &[PatternRecognitionResult],
    ) -> PatternComparison {
        let comparison =
            compare_pattern_sets(set_a, set_b, self.config.analysis.effective_merge_similarity());
        tracing::debug!(
            common = comparison.common.len(),
            unique_a = comparison.unique_a.len(),
            unique_b = comparison.unique_b.len(),
            "pattern sets compared"
        );
        comparison
    }

    /// Correlations between emotion-analysis features.
    ///
    /// A computation failure yields the `correlation_unavailable` fallback
    /// record instead of an empty list.
    pub fn analyze_risk_factor_correlations(
        &self,
        ctx: &AnalysisContext,
        analyses: &[EmotionAnalysis],
    ) -> AnalysisOutcome<Vec<RiskCorrelation>> {
        let span = ctx.operation_span("analyze_risk_factor_correlations");
        let _entered = span.enter();
        correlation_outcome(analyses, analyze_correlations(analyses, &self.config.correlation))
    }

    /// Trend analysis of a single indicator series.
    pub fn analyze_trend_series(
        &self,
        ctx: &AnalysisContext,
        series: &HistoricalSeries,
    ) -> AnalysisOutcome<Option<TrendPattern>> {
        let span = ctx.operation_span("analyze_trend_series");
        let _entered = span.enter();
        match analyze_series(ctx.client_id(), series, &self.config.analysis, &self.config.trends) {
            Ok(pattern) => AnalysisOutcome::Complete(Some(pattern)),
            Err(err) => degraded_empty(err),
        }
    }

    /// Fetch every indicator series in `[start, end]` and analyse each.
    ///
    /// Series that cannot be analysed are skipped; the first such failure
    /// marks the whole outcome as degraded.
    pub async fn analyze_long_term_trends<P: TimeSeriesProvider>(
        &self,
        ctx: &AnalysisContext,
        provider: &P,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AnalysisOutcome<Vec<TrendPattern>> {
        let span = ctx.operation_span("analyze_long_term_trends");
        async {
            if let Err(err) = check_range(start, end) {
                return degraded_empty(err);
            }
            let series = match provider.fetch_series(ctx.client_id(), start, end).await {
                Ok(series) => series,
                Err(err) => return degraded_empty(err.into()),
            };

            let mut trends = Vec::with_capacity(series.len());
            let mut first_failure = None;
            for s in &series {
                match analyze_series(ctx.client_id(), s, &self.config.analysis, &self.config.trends) {
                    Ok(pattern) => trends.push(pattern),
                    Err(err) => {
                        report(&err);
                        first_failure.get_or_insert(err);
                    }
                }
            }
            info!(series = series.len(), trends = trends.len(), "long-term trends complete");
            match first_failure {
                None => AnalysisOutcome::Complete(trends),
                Some(err) => AnalysisOutcome::degraded(trends, err),
            }
        }
        .instrument(span)
        .await
    }

    /// Cluster sessions, build the session network, and mine co-occurrences.
    pub fn detect_cross_session_patterns_advanced(
        &self,
        ctx: &AnalysisContext,
        sessions: &[TherapySession],
    ) -> AnalysisOutcome<Vec<CrossSessionPattern>> {
        let span = ctx.operation_span("detect_cross_session_patterns_advanced");
        let _entered = span.enter();
        let sessions = chronological(sessions);
        match mine_cross_session_patterns(&sessions, &self.config.mining) {
            Ok(patterns) => {
                info!(
                    sessions = sessions.len(),
                    patterns = patterns.len(),
                    "cross-session mining complete"
                );
                AnalysisOutcome::Complete(patterns)
            }
            Err(err) => degraded_empty(err),
        }
    }

    /// Fetch sessions from the history store, then run
    /// [`detect_cross_session_patterns`](Self::detect_cross_session_patterns).
    /// An empty `session_ids` list means every session of the client.
    pub async fn detect_patterns_for_sessions<P: SessionHistoryProvider>(
        &self,
        ctx: &AnalysisContext,
        provider: &P,
        session_ids: &[String],
    ) -> AnalysisOutcome<Vec<PatternRecognitionResult>> {
        let fetched = provider
            .fetch_sessions(ctx.client_id(), session_ids)
            .instrument(ctx.operation_span("fetch_sessions"))
            .await;
        match fetched {
            Ok(sessions) => self.detect_cross_session_patterns(ctx, &sessions),
            Err(err) => {
                let _entered = ctx.span().enter();
                degraded_empty(err.into())
            }
        }
    }

    /// Fetch emotion analyses in `[start, end]`, then run
    /// [`analyze_risk_factor_correlations`](Self::analyze_risk_factor_correlations).
    pub async fn analyze_correlations_between<P: EmotionAnalysisProvider>(
        &self,
        ctx: &AnalysisContext,
        provider: &P,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AnalysisOutcome<Vec<RiskCorrelation>> {
        if let Err(err) = check_range(start, end) {
            let _entered = ctx.span().enter();
            return degraded_empty(err);
        }
        let fetched = provider
            .fetch_analyses(ctx.client_id(), start, end)
            .instrument(ctx.operation_span("fetch_analyses"))
            .await;
        match fetched {
            Ok(analyses) => self.analyze_risk_factor_correlations(ctx, &analyses),
            Err(err) => {
                let _entered = ctx.span().enter();
                degraded_empty(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::correlation::FALLBACK_FACTOR;
    use chrono::TimeZone;

    fn analyses(n: usize) -> Vec<EmotionAnalysis> {
        let base = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        (0..n)
            .map(|i| EmotionAnalysis {
                id: format!("ea-{i}"),
                timestamp: base + chrono::Duration::hours(i as i64),
                emotions: Default::default(),
                confidence: 0.9,
            })
            .collect()
    }

    #[test]
    fn test_computation_failure_returns_fallback() {
        let input = analyses(4);
        let err = AnalysisError::computation("t-test", "non-finite p-value");
        let outcome = correlation_outcome(&input, Err(err.clone()));
        assert_eq!(outcome.reason(), Some(&err));
        let value = outcome.into_value();
        assert_eq!(value.len(), 1);
        assert_eq!(value[0].primary_factor, FALLBACK_FACTOR);
        assert_eq!(value[0].metrics.sample_size, 4);
    }

    #[test]
    fn test_other_failures_degrade_to_empty() {
        let input = analyses(2);
        let outcome = correlation_outcome(
            &input,
            Err(AnalysisError::insufficient("risk factor correlation", 3, 2)),
        );
        assert!(outcome.value().is_empty());
        assert!(matches!(outcome.reason(), Some(AnalysisError::InsufficientData { .. })));
    }

    #[test]
    fn test_success_is_complete() {
        let outcome = correlation_outcome(&analyses(3), Ok(Vec::new()));
        assert!(outcome.is_complete());
    }
}

//! Cadence data model: input records supplied by external collaborators and
//! the typed result records produced by the analytic core.

pub mod comparison;
pub mod correlation;
pub mod cross_session;
pub mod emotion;
pub mod outcome;
pub mod pattern;
pub mod series;
pub mod session;
pub mod trend;

pub use comparison::PatternComparison;
pub use correlation::{CorrelatedFactor, CorrelationMetrics, EffectSize, RiskCorrelation, TimeFrame};
pub use cross_session::{
    AdvancedMetrics, CrossSessionPattern, ImpactLevel, NetworkAnalysis, TemporalCharacteristics,
};
pub use emotion::{EmotionAnalysis, EmotionVector};
pub use outcome::AnalysisOutcome;
pub use pattern::{
    ClinicalRelevance, PatternRecognitionResult, PatternStatistics, PatternType, Seasonality,
    Significance, TimelineAnalysis, TrendDirection, Urgency,
};
pub use series::{HistoricalSeries, TimeSeriesPoint};
pub use session::{RiskLevel, SessionAnnotations, TherapySession};
pub use trend::{
    AlgorithmicAnalysis, ChangePoint, ChangeType, ClinicalImplications, LinearRegression,
    SeasonalDecomposition, Severity, TrendPattern, TrendShape,
};

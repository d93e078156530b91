//! # cadence-core
//!
//! Foundation crate for the Cadence clinical analytics engine.
//! Defines the session/emotion data model, result records, errors, config,
//! tracing setup, the analysis context, and the external provider traits.
//! `cadence-analysis` builds every algorithm on top of these.

pub mod config;
pub mod constants;
pub mod context;
pub mod errors;
pub mod models;
pub mod tracing_setup;
pub mod traits;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::CadenceConfig;
pub use context::AnalysisContext;
pub use errors::{AnalysisError, CadenceError, CadenceResult};
pub use models::{AnalysisOutcome, EmotionAnalysis, TherapySession};

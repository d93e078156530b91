//! # cadence-analysis
//!
//! Pattern-recognition and clinical-risk analytics for therapy sessions.
//!
//! Leaf-first: `features` turns records into numeric vectors, `stats` holds
//! the shared statistical primitives, `patterns` runs the four detectors and
//! the validator/comparator, `correlation` builds risk-factor correlations,
//! `trends` decomposes long-term series and flags change points, and
//! `cross_session` clusters sessions and mines co-occurrences. `engine` ties
//! them together behind `PatternEngine`.

pub mod correlation;
pub mod cross_session;
pub mod engine;
pub mod features;
pub mod patterns;
pub mod stats;
pub mod trends;

pub use engine::PatternEngine;

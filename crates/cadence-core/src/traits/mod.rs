//! Seams to the external collaborators the core consumes.

pub mod in_memory;
pub mod providers;

pub use in_memory::InMemoryProvider;
pub use providers::{EmotionAnalysisProvider, SessionHistoryProvider, TimeSeriesProvider};

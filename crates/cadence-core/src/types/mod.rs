//! Shared helper types.

pub mod collections;
pub mod identifiers;

pub use identifiers::deterministic_id;

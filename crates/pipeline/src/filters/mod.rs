//! Filter implementations for the workout pipeline.

pub mod dedup_by_name;
pub mod top_n;

// Re-export for convenience
pub use dedup_by_name::{DedupByNameFilter, dedup_by_name};
pub use top_n::TopNFilter;

//! The FilterPipeline chains filters over the merged exercise list.

use crate::filters::{DedupByNameFilter, TopNFilter};
use crate::traits::Filter;
use catalog::ExternalExercise;

/// Maximum number of exercises in a workout reply.
pub const MAX_EXERCISES: usize = 10;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(DedupByNameFilter)
///     .add_filter(TopNFilter::new(10));
///
/// let exercises = pipeline.apply(merged);
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// The workout reply pipeline: dedup by name, then keep the first ten.
    pub fn workout() -> Self {
        Self::new()
            .add_filter(DedupByNameFilter)
            .add_filter(TopNFilter::new(MAX_EXERCISES))
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Apply all filters in sequence.
    pub fn apply(&self, exercises: Vec<ExternalExercise>) -> Vec<ExternalExercise> {
        let mut current = exercises;
        for filter in &self.filters {
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current);
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        current
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

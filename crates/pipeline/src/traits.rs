//! Core traits for the post-merge stage of the workout flow.
//!
//! This module defines the Filter trait that allows composable
//! filters to be applied to the merged exercise list.

use catalog::ExternalExercise;

/// Core trait for filtering merged exercises.
///
/// ## Design Note
/// - `Send + Sync` allows filters to be shared across concurrent requests
/// - Filters take ownership of the Vec and return a filtered Vec
/// - Filters must preserve the relative order of the entries they keep
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to the merged exercises.
    fn apply(&self, exercises: Vec<ExternalExercise>) -> Vec<ExternalExercise>;
}

//! Filter to keep only the first N exercises.

use crate::traits::Filter;
use catalog::ExternalExercise;

/// Truncates the list to `limit` entries, keeping order.
pub struct TopNFilter {
    limit: usize,
}

impl TopNFilter {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }
}

impl Filter for TopNFilter {
    fn name(&self) -> &str {
        "TopNFilter"
    }

    fn apply(&self, mut exercises: Vec<ExternalExercise>) -> Vec<ExternalExercise> {
        exercises.truncate(self.limit);
        exercises
    }
}

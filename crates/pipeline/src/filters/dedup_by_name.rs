//! Filter to remove exercises whose name has already been seen.

use crate::traits::Filter;
use catalog::ExternalExercise;
use std::collections::HashSet;

/// Keeps the first exercise for each exact name, in merge order.
pub struct DedupByNameFilter;

impl Filter for DedupByNameFilter {
    fn name(&self) -> &str {
        "DedupByNameFilter"
    }

    fn apply(&self, exercises: Vec<ExternalExercise>) -> Vec<ExternalExercise> {
        dedup_by_name(exercises)
    }
}

/// First occurrence wins; names are compared exactly (no case folding).
pub fn dedup_by_name(exercises: Vec<ExternalExercise>) -> Vec<ExternalExercise> {
    let mut seen: HashSet<String> = HashSet::with_capacity(exercises.len());
    exercises
        .into_iter()
        .filter(|exercise| seen.insert(exercise.name.clone()))
        .collect()
}

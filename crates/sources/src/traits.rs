//! Provider traits and the query types they accept.
//!
//! The orchestrator only sees these traits, so the HTTP providers can be
//! swapped for in-memory ones in tests.

use async_trait::async_trait;
use catalog::{Difficulty, Equipment, ExternalExercise, MealPlanResult};

use crate::error::Result;

/// Parameters for one exercise-catalog lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseQuery {
    pub muscle: String,
    pub difficulty: Difficulty,
    pub equipment: Equipment,
}

/// Parameters for one day meal plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealQuery {
    pub target_calories: u32,
    /// `""`, `"vegetarian"` or `"vegan"`
    pub diet: String,
    /// Comma-joined ingredients to exclude
    pub exclude: String,
}

/// Source of exercise records for a single muscle group.
///
/// ## Design Note
/// - An empty `Vec` is a valid answer, distinct from an error; the caller
///   decides how to degrade in both cases.
#[async_trait]
pub trait ExerciseProvider: Send + Sync {
    /// Returns the name of this provider (for logging/debugging)
    fn name(&self) -> &str;

    async fn fetch_exercises(&self, query: &ExerciseQuery) -> Result<Vec<ExternalExercise>>;
}

/// Source of generated meal plans.
#[async_trait]
pub trait MealPlanProvider: Send + Sync {
    /// Returns the name of this provider (for logging/debugging)
    fn name(&self) -> &str;

    async fn generate_plan(&self, query: &MealQuery) -> Result<MealPlanResult>;
}

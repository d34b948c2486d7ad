//! Request normalization and exercise aggregation for the recommendation flows.
//!
//! This crate provides:
//! - `RequestNormalizer` for validating inbound bodies before any outbound call
//! - The target calculator for meal queries
//! - `resolve_muscle_group`, the single fallback site for exercise lookups
//! - `ExerciseAggregator` for bounded fan-out, ordered merge and filtering
//!
//! ## Architecture
//! The workout flow processes muscle groups in stages:
//! 1. Each muscle group is resolved to Found / Fallback / Placeholder
//! 2. Outcomes are merged in declared order
//! 3. Filters dedup by name and keep the first ten
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{ExerciseAggregator, RequestNormalizer};
//!
//! let normalizer = RequestNormalizer::new(tables.clone());
//! let request = normalizer.workout(&body)?;
//!
//! let aggregator = ExerciseAggregator::new(provider, fallback);
//! let exercises = aggregator.aggregate(&request).await;
//! ```

pub mod aggregate;
pub mod error;
pub mod filter_pipeline;
pub mod filters;
pub mod normalize;
pub mod resolve;
pub mod targets;
pub mod traits;

// Re-export main types
pub use aggregate::{DEFAULT_FAN_OUT, ExerciseAggregator, merge_outcomes};
pub use error::ValidationError;
pub use filter_pipeline::{FilterPipeline, MAX_EXERCISES};
pub use normalize::{
    DEFAULT_MUSCLE_GROUP, MealPlanRequest, PredictionRequest, RequestNormalizer, WorkoutRequest,
};
pub use resolve::{DegradeReason, MuscleGroupOutcome, resolve_muscle_group};
pub use targets::{diet_filter, exclusion_list, target_calories};
pub use traits::Filter;

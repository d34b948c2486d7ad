//! # Recommendation Orchestrator
//!
//! Coordinates the three flows:
//! 1. Meal plan: normalize, compute targets, one provider call
//! 2. Workout plan: normalize, map equipment/difficulty, aggregate exercises
//! 3. Prediction: normalize, run the inference bridge
//!
//! Every flow validates its input before any outbound call. Replies are
//! shaped here; the HTTP layer only serializes them.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use catalog::{ExternalExercise, FallbackCatalog, MappingTables, MealPlanResult};
use inference::{InferenceProvider, PredictionResult, ProcessInference};
use pipeline::{ExerciseAggregator, RequestNormalizer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sources::{ApiNinjasExercises, ExerciseProvider, MealPlanProvider, SpoonacularMealPlans};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument};

use crate::config::ServerConfig;
use crate::error::Result;

/// Reply for the meal flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlanReply {
    pub plan: MealPlanResult,
}

/// Reply for the workout flow. The echoed fields are omitted when the caller
/// did not send them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutReply {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fitness_level: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_time: Option<Value>,
    pub exercises: Vec<ExternalExercise>,
}

/// Main orchestrator shared by the HTTP handlers and the CLI
pub struct RecommendationOrchestrator {
    normalizer: RequestNormalizer,
    meal_provider: Arc<dyn MealPlanProvider>,
    aggregator: ExerciseAggregator,
    inference: Arc<dyn InferenceProvider>,
}

impl RecommendationOrchestrator {
    pub fn new(
        tables: Arc<MappingTables>,
        meal_provider: Arc<dyn MealPlanProvider>,
        aggregator: ExerciseAggregator,
        inference: Arc<dyn InferenceProvider>,
    ) -> Self {
        Self {
            normalizer: RequestNormalizer::new(tables),
            meal_provider,
            aggregator,
            inference,
        }
    }

    /// Build the production wiring: HTTP providers, fallback catalog, process inference.
    pub fn from_config(config: &ServerConfig) -> anyhow::Result<Self> {
        let fallback = match &config.fallback_catalog_path {
            Some(path) => FallbackCatalog::load_from_file(path)
                .with_context(|| format!("Failed to load fallback catalog {}", path.display()))?,
            None => FallbackCatalog::builtin(),
        };
        info!("Fallback catalog covers {} muscle groups", fallback.muscle_count());

        let meal_provider = SpoonacularMealPlans::new(config.spoonacular.clone())
            .context("Failed to create meal provider")?;
        let exercise_provider: Arc<dyn ExerciseProvider> = Arc::new(
            ApiNinjasExercises::new(config.api_ninjas.clone())
                .context("Failed to create exercise provider")?,
        );

        let aggregator = ExerciseAggregator::new(exercise_provider, Arc::new(fallback))
            .with_fan_out(config.exercise_fan_out);
        let inference = ProcessInference::new(config.inference.clone())
            .with_timeout(config.inference_timeout)
            .with_max_concurrent(config.inference_max_concurrent);

        Ok(Self::new(
            Arc::new(MappingTables::standard()),
            Arc::new(meal_provider),
            aggregator,
            Arc::new(inference),
        ))
    }

    /// Meal flow: a one-day plan for the caller's goal, diet and allergies.
    ///
    /// Fails as a whole on any provider error; there is no partial plan.
    #[instrument(skip(self, body))]
    pub async fn meal_plan(&self, body: &Value) -> Result<MealPlanReply> {
        let start_time = Instant::now();

        let request = self.normalizer.meal(body)?;
        let query = request.to_query(self.normalizer.tables());
        info!(
            "Meal query: targetCalories={}, diet={:?}, exclude={:?}",
            query.target_calories, query.diet, query.exclude
        );

        let plan = self.meal_provider.generate_plan(&query).await.map_err(|e| {
            error!("Error fetching meal plan from {}: {}", e.provider(), e);
            e
        })?;
        info!(
            "Meal plan with {} meals generated in {:.2?}",
            plan.meals.len(),
            start_time.elapsed()
        );

        Ok(MealPlanReply { plan })
    }

    /// Workout flow: up to ten unique exercises across the requested muscle groups.
    ///
    /// Only validation can fail; provider trouble degrades per muscle group.
    #[instrument(skip(self, body))]
    pub async fn workout_plan(&self, body: &Value) -> Result<WorkoutReply> {
        let start_time = Instant::now();

        let request = self.normalizer.workout(body)?;
        info!(
            "Workout request: equipment={}, difficulty={}, {} muscle groups",
            request.equipment,
            request.difficulty,
            request.muscle_groups.len()
        );

        let exercises = self.aggregator.aggregate(&request).await;
        info!(
            "Returning {} exercises in {:.2?}",
            exercises.len(),
            start_time.elapsed()
        );

        Ok(WorkoutReply {
            goal: request.goal,
            fitness_level: request.fitness_level,
            session_time: request.session_time,
            exercises,
        })
    }

    /// Prediction flow: the inference program's reply, unchanged.
    #[instrument(skip(self, body, cancel))]
    pub async fn predict(&self, body: &Value, cancel: CancellationToken) -> Result<PredictionResult> {
        let start_time = Instant::now();

        let request = self.normalizer.prediction(body)?;
        let prediction = self
            .inference
            .predict(&request.payload, cancel)
            .await
            .map_err(|e| {
                error!("Prediction failed: {}", e);
                e
            })?;
        info!("Prediction completed in {:.2?}", start_time.elapsed());

        Ok(prediction)
    }
}

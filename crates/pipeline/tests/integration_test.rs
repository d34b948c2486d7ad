//! Integration tests for the pipeline.
//!
//! These tests drive the normalizer, target calculator and aggregator
//! together the way the server does, with an in-memory exercise provider.

use async_trait::async_trait;
use catalog::{ExternalExercise, FallbackCatalog, MappingTables};
use pipeline::{ExerciseAggregator, RequestNormalizer, ValidationError};
use serde_json::json;
use sources::{ExerciseProvider, ExerciseQuery, ProviderError};
use std::sync::{Arc, Mutex};

/// Serves a fixed catalog keyed by muscle and records every query it sees
struct InMemoryProvider {
    catalog: Vec<ExternalExercise>,
    seen: Mutex<Vec<ExerciseQuery>>,
}

#[async_trait]
impl ExerciseProvider for InMemoryProvider {
    fn name(&self) -> &str {
        "in-memory"
    }

    async fn fetch_exercises(
        &self,
        query: &ExerciseQuery,
    ) -> sources::Result<Vec<ExternalExercise>> {
        self.seen.lock().unwrap().push(query.clone());
        if query.muscle == "neck" {
            return Err(ProviderError::Decode {
                provider: "in-memory".to_string(),
                reason: "truncated body".to_string(),
            });
        }
        Ok(self
            .catalog
            .iter()
            .filter(|e| e.muscle == query.muscle)
            .cloned()
            .collect())
    }
}

fn exercise(name: &str, muscle: &str) -> ExternalExercise {
    ExternalExercise {
        name: name.to_string(),
        kind: "strength".to_string(),
        muscle: muscle.to_string(),
        equipment: "dumbbell".to_string(),
        difficulty: "intermediate".to_string(),
        instructions: format!("Do the {}.", name),
    }
}

fn create_test_setup() -> (RequestNormalizer, ExerciseAggregator, Arc<InMemoryProvider>) {
    let provider = Arc::new(InMemoryProvider {
        catalog: vec![
            exercise("Dumbbell Bench Press", "chest"),
            exercise("Dumbbell Fly", "chest"),
            exercise("Hammer Curl", "biceps"),
            exercise("Zottman Curl", "biceps"),
            // Same name as a chest entry; chest is declared first so this one is dropped
            exercise("Dumbbell Fly", "biceps"),
        ],
        seen: Mutex::new(Vec::new()),
    });

    let normalizer = RequestNormalizer::new(Arc::new(MappingTables::standard()));
    let aggregator =
        ExerciseAggregator::new(provider.clone(), Arc::new(FallbackCatalog::builtin()));

    (normalizer, aggregator, provider)
}

#[tokio::test]
async fn test_workout_flow_end_to_end() {
    let (normalizer, aggregator, provider) = create_test_setup();

    let request = normalizer
        .workout(&json!({
            "fitnessLevel": "Intermediate",
            "equipment": "dumbbell",
            "muscleGroups": ["chest", "biceps", "neck"]
        }))
        .unwrap();
    let exercises = aggregator.aggregate(&request).await;

    let names: Vec<_> = exercises.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Dumbbell Bench Press",
            "Dumbbell Fly",
            "Hammer Curl",
            "Zottman Curl",
            "No exercises found for neck",
        ]
    );
    assert_eq!(exercises[1].muscle, "chest");

    let seen = provider.seen.lock().unwrap();
    assert_eq!(seen.len(), 3);
    assert!(seen.iter().all(|q| q.difficulty.as_str() == "intermediate"));
    assert!(seen.iter().all(|q| q.equipment.provider_value() == "dumbbell"));
}

#[tokio::test]
async fn test_invalid_workout_never_reaches_provider() {
    let (normalizer, _aggregator, provider) = create_test_setup();

    let err = normalizer
        .workout(&json!({"equipment": "resistance band", "muscleGroups": ["chest"]}))
        .unwrap_err();

    assert!(matches!(err, ValidationError::InvalidEquipment { .. }));
    assert!(provider.seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_back_with_mixed_case_uses_fallback() {
    let (normalizer, aggregator, _provider) = create_test_setup();

    let request = normalizer
        .workout(&json!({"equipment": "barbell", "muscleGroup": "Back"}))
        .unwrap();
    let exercises = aggregator.aggregate(&request).await;

    assert_eq!(
        exercises,
        FallbackCatalog::builtin().get("back").unwrap().to_vec()
    );
}

#[test]
fn test_meal_flow_query() {
    let normalizer = RequestNormalizer::new(Arc::new(MappingTables::standard()));

    let request = normalizer
        .meal(&json!({
            "goal": "Weight Loss",
            "preference": "Vegetarian",
            "allergies": ["peanuts"],
            "weight": 70
        }))
        .unwrap();
    let query = request.to_query(normalizer.tables());

    assert_eq!(query.target_calories, 910);
    assert_eq!(query.diet, "vegetarian");
    assert_eq!(query.exclude, "peanuts");
}

#[test]
fn test_meal_flow_string_weight_and_unknown_goal() {
    let normalizer = RequestNormalizer::new(Arc::new(MappingTables::standard()));

    let request = normalizer
        .meal(&json!({
            "goal": "Get Fit",
            "preference": "Paleo",
            "allergies": ["shellfish", " Gluten"],
            "weight": "80"
        }))
        .unwrap();
    let query = request.to_query(normalizer.tables());

    // Unknown goals use the maintenance factor
    assert_eq!(query.target_calories, 1200);
    assert_eq!(query.diet, "");
    assert_eq!(query.exclude, "shellfish, Gluten");
}

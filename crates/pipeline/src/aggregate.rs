//! # Exercise Aggregator
//!
//! Resolves every requested muscle group, merges the results in declared
//! order, then runs the workout filter pipeline (dedup by name, top 10).
//!
//! Muscle groups are resolved as independent futures with bounded fan-out.
//! `buffered` yields results in input order regardless of which call finishes
//! first, so the merge (and therefore dedup) is deterministic.

use std::sync::Arc;
use std::time::Instant;

use catalog::{Difficulty, Equipment, ExternalExercise, FallbackCatalog};
use futures_util::stream::{self, StreamExt};
use sources::{ExerciseProvider, ExerciseQuery};
use tracing::{info, instrument};

use crate::filter_pipeline::FilterPipeline;
use crate::normalize::WorkoutRequest;
use crate::resolve::{MuscleGroupOutcome, resolve_muscle_group};

/// Default number of provider calls in flight per request.
pub const DEFAULT_FAN_OUT: usize = 4;

/// Fans out per-muscle lookups and merges them into the reply list.
#[derive(Clone)]
pub struct ExerciseAggregator {
    provider: Arc<dyn ExerciseProvider>,
    fallback: Arc<FallbackCatalog>,
    filter_pipeline: Arc<FilterPipeline>,
    fan_out: usize,
}

impl ExerciseAggregator {
    pub fn new(provider: Arc<dyn ExerciseProvider>, fallback: Arc<FallbackCatalog>) -> Self {
        Self {
            provider,
            fallback,
            filter_pipeline: Arc::new(FilterPipeline::workout()),
            fan_out: DEFAULT_FAN_OUT,
        }
    }

    /// Configure how many provider calls may run at once (default: 4, minimum 1)
    pub fn with_fan_out(mut self, fan_out: usize) -> Self {
        self.fan_out = fan_out.max(1);
        self
    }

    /// Exercises for a validated workout request: at most ten, unique by name.
    #[instrument(skip(self, request), fields(muscles = request.muscle_groups.len()))]
    pub async fn aggregate(&self, request: &WorkoutRequest) -> Vec<ExternalExercise> {
        let start_time = Instant::now();

        let outcomes = self
            .resolve_all(&request.muscle_groups, request.difficulty, request.equipment)
            .await;
        let merged = merge_outcomes(outcomes);
        let merged_len = merged.len();

        let exercises = self.filter_pipeline.apply(merged);
        info!(
            "Aggregated {} exercises ({} before dedup/truncate) in {:.2?}",
            exercises.len(),
            merged_len,
            start_time.elapsed()
        );
        exercises
    }

    /// One outcome per muscle group, in the order the groups were given.
    pub async fn resolve_all(
        &self,
        muscle_groups: &[String],
        difficulty: Difficulty,
        equipment: Equipment,
    ) -> Vec<MuscleGroupOutcome> {
        let provider = self.provider.as_ref();
        let fallback = self.fallback.as_ref();

        stream::iter(muscle_groups.iter().cloned())
            .map(|muscle| async move {
                let query = ExerciseQuery {
                    muscle,
                    difficulty,
                    equipment,
                };
                resolve_muscle_group(provider, fallback, &query).await
            })
            .buffered(self.fan_out)
            .collect()
            .await
    }
}

/// Concatenate outcomes in the order given.
pub fn merge_outcomes(outcomes: Vec<MuscleGroupOutcome>) -> Vec<ExternalExercise> {
    outcomes
        .into_iter()
        .flat_map(MuscleGroupOutcome::into_exercises)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use sources::ProviderError;
    use std::collections::HashMap;
    use std::time::Duration;

    fn exercise(name: &str, muscle: &str) -> ExternalExercise {
        ExternalExercise {
            name: name.to_string(),
            kind: "strength".to_string(),
            muscle: muscle.to_string(),
            equipment: "dumbbell".to_string(),
            difficulty: "beginner".to_string(),
            instructions: "Lift.".to_string(),
        }
    }

    /// Per-muscle canned replies with a per-muscle delay; unknown muscles fail
    struct ScriptedProvider {
        replies: HashMap<&'static str, (u64, Vec<ExternalExercise>)>,
    }

    #[async_trait]
    impl ExerciseProvider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn fetch_exercises(
            &self,
            query: &ExerciseQuery,
        ) -> sources::Result<Vec<ExternalExercise>> {
            match self.replies.get(query.muscle.as_str()) {
                Some((delay_ms, list)) => {
                    tokio::time::sleep(Duration::from_millis(*delay_ms)).await;
                    Ok(list.clone())
                }
                None => Err(ProviderError::Decode {
                    provider: "scripted".to_string(),
                    reason: "no script".to_string(),
                }),
            }
        }
    }

    fn request(muscles: &[&str]) -> WorkoutRequest {
        WorkoutRequest {
            goal: Some(json!("Muscle Gain")),
            fitness_level: None,
            session_time: None,
            difficulty: Difficulty::Beginner,
            equipment: Equipment::Dumbbell,
            muscle_groups: muscles.iter().map(|m| m.to_string()).collect(),
        }
    }

    fn aggregator(provider: ScriptedProvider) -> ExerciseAggregator {
        ExerciseAggregator::new(Arc::new(provider), Arc::new(FallbackCatalog::builtin()))
    }

    #[tokio::test]
    async fn test_merge_follows_declared_order_not_completion_order() {
        // chest finishes last but was declared first, so its "Push-up" wins
        let provider = ScriptedProvider {
            replies: HashMap::from([
                ("chest", (80, vec![exercise("Push-up", "chest")])),
                ("triceps", (0, vec![exercise("Push-up", "triceps"), exercise("Dip", "triceps")])),
            ]),
        };

        let exercises = aggregator(provider).aggregate(&request(&["chest", "triceps"])).await;

        assert_eq!(exercises.len(), 2);
        assert_eq!(exercises[0].name, "Push-up");
        assert_eq!(exercises[0].muscle, "chest");
        assert_eq!(exercises[1].name, "Dip");
    }

    #[tokio::test]
    async fn test_back_failure_equals_fallback_catalog() {
        let provider = ScriptedProvider {
            replies: HashMap::new(),
        };

        let exercises = aggregator(provider).aggregate(&request(&["back"])).await;

        let expected = FallbackCatalog::builtin().get("back").unwrap().to_vec();
        assert_eq!(exercises, expected);
    }

    #[tokio::test]
    async fn test_one_failing_group_does_not_fail_others() {
        let provider = ScriptedProvider {
            replies: HashMap::from([("biceps", (0, vec![exercise("Curl", "biceps")]))]),
        };

        let exercises = aggregator(provider)
            .with_fan_out(1)
            .aggregate(&request(&["biceps", "elbow"]))
            .await;

        assert_eq!(exercises.len(), 2);
        assert_eq!(exercises[0].name, "Curl");
        assert_eq!(exercises[1].name, "No exercises found for elbow");
    }

    #[tokio::test]
    async fn test_result_is_capped_and_unique() {
        let many: Vec<_> = (0..15).map(|i| exercise(&format!("Row {}", i), "lats")).collect();
        let provider = ScriptedProvider {
            replies: HashMap::from([("lats", (0, many))]),
        };

        // back contributes 8 fallback entries, lats 15 live ones
        let exercises = aggregator(provider).aggregate(&request(&["back", "lats", "back"])).await;

        assert_eq!(exercises.len(), 10);
        assert_eq!(exercises[0].name, "Bent-Over Barbell Row");
        assert_eq!(exercises[8].name, "Row 0");
        assert_eq!(exercises[9].name, "Row 1");
    }

    #[tokio::test]
    async fn test_resolve_all_preserves_order() {
        let provider = ScriptedProvider {
            replies: HashMap::from([
                ("a", (30, vec![exercise("A", "a")])),
                ("b", (0, vec![])),
                ("c", (10, vec![exercise("C", "c")])),
            ]),
        };

        let outcomes = aggregator(provider)
            .resolve_all(
                &["a".to_string(), "b".to_string(), "c".to_string()],
                Difficulty::Beginner,
                Equipment::Dumbbell,
            )
            .await;

        let labels: Vec<_> = outcomes.iter().map(|o| o.label()).collect();
        assert_eq!(labels, vec!["found", "placeholder", "found"]);
    }
}

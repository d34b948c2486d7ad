//! Per-muscle-group resolution: one provider call, degraded to the fallback
//! catalog or a placeholder when that call yields nothing.
//!
//! This is the only place the fallback policy lives. A failing provider call
//! never escapes it; the failure is recorded in the outcome for logging.

use catalog::{ExternalExercise, FallbackCatalog};
use sources::{ExerciseProvider, ExerciseQuery};
use tracing::{debug, info, warn};

/// Why a muscle group did not use live provider data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DegradeReason {
    /// The provider answered with an empty list
    Empty,
    /// The provider call failed; the message is for server-side logs only
    ProviderError(String),
}

/// Result of resolving one muscle group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MuscleGroupOutcome {
    /// Live provider data
    Found(Vec<ExternalExercise>),
    /// Curated catalog entries substituted for the muscle
    Fallback {
        exercises: Vec<ExternalExercise>,
        reason: DegradeReason,
    },
    /// Single explanatory entry for a muscle with nothing to offer
    Placeholder {
        exercise: ExternalExercise,
        reason: DegradeReason,
    },
}

impl MuscleGroupOutcome {
    /// Exercises contributed to the merge, in provider order.
    pub fn into_exercises(self) -> Vec<ExternalExercise> {
        match self {
            MuscleGroupOutcome::Found(exercises) => exercises,
            MuscleGroupOutcome::Fallback { exercises, .. } => exercises,
            MuscleGroupOutcome::Placeholder { exercise, .. } => vec![exercise],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MuscleGroupOutcome::Found(_) => "found",
            MuscleGroupOutcome::Fallback { .. } => "fallback",
            MuscleGroupOutcome::Placeholder { .. } => "placeholder",
        }
    }
}

/// Resolve one muscle group against the provider, degrading on empty or error.
pub async fn resolve_muscle_group(
    provider: &dyn ExerciseProvider,
    fallback: &FallbackCatalog,
    query: &ExerciseQuery,
) -> MuscleGroupOutcome {
    debug!("Fetching exercises for muscle group: {}", query.muscle);

    let reason = match provider.fetch_exercises(query).await {
        Ok(exercises) if !exercises.is_empty() => {
            info!("Exercises found for {}: {}", query.muscle, exercises.len());
            return MuscleGroupOutcome::Found(exercises);
        }
        Ok(_) => {
            info!("No exercises found for {}", query.muscle);
            DegradeReason::Empty
        }
        Err(e) => {
            warn!(
                "{} error for muscle group {}: {}",
                provider.name(),
                query.muscle,
                e
            );
            DegradeReason::ProviderError(e.to_string())
        }
    };

    degrade(fallback, query, reason)
}

fn degrade(
    fallback: &FallbackCatalog,
    query: &ExerciseQuery,
    reason: DegradeReason,
) -> MuscleGroupOutcome {
    match fallback.get(&query.muscle) {
        Some(exercises) => {
            warn!(
                "Using {} fallback exercises for {}",
                exercises.len(),
                query.muscle
            );
            MuscleGroupOutcome::Fallback {
                exercises: exercises.to_vec(),
                reason,
            }
        }
        None => MuscleGroupOutcome::Placeholder {
            exercise: ExternalExercise::placeholder(
                &query.muscle,
                query.equipment,
                query.difficulty,
            ),
            reason,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use catalog::{Difficulty, Equipment};
    use sources::ProviderError;

    enum Reply {
        Exercises(Vec<ExternalExercise>),
        Fail,
    }

    struct FixedProvider(Reply);

    #[async_trait]
    impl ExerciseProvider for FixedProvider {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn fetch_exercises(
            &self,
            _query: &ExerciseQuery,
        ) -> sources::Result<Vec<ExternalExercise>> {
            match &self.0 {
                Reply::Exercises(list) => Ok(list.clone()),
                Reply::Fail => Err(ProviderError::Status {
                    provider: "fixed".to_string(),
                    status: 503,
                    body: "unavailable".to_string(),
                }),
            }
        }
    }

    fn query(muscle: &str) -> ExerciseQuery {
        ExerciseQuery {
            muscle: muscle.to_string(),
            difficulty: Difficulty::Intermediate,
            equipment: Equipment::Dumbbell,
        }
    }

    fn curl() -> ExternalExercise {
        ExternalExercise {
            name: "Hammer Curl".to_string(),
            kind: "strength".to_string(),
            muscle: "biceps".to_string(),
            equipment: "dumbbell".to_string(),
            difficulty: "intermediate".to_string(),
            instructions: "Curl.".to_string(),
        }
    }

    #[tokio::test]
    async fn test_found() {
        let provider = FixedProvider(Reply::Exercises(vec![curl()]));
        let outcome =
            resolve_muscle_group(&provider, &FallbackCatalog::builtin(), &query("biceps")).await;

        assert_eq!(outcome, MuscleGroupOutcome::Found(vec![curl()]));
    }

    #[tokio::test]
    async fn test_back_empty_uses_fallback() {
        let provider = FixedProvider(Reply::Exercises(vec![]));
        let catalog = FallbackCatalog::builtin();
        let outcome = resolve_muscle_group(&provider, &catalog, &query("Back")).await;

        match outcome {
            MuscleGroupOutcome::Fallback { exercises, reason } => {
                assert_eq!(exercises, catalog.get("back").unwrap().to_vec());
                assert_eq!(reason, DegradeReason::Empty);
            }
            other => panic!("expected fallback, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_back_error_uses_fallback() {
        let provider = FixedProvider(Reply::Fail);
        let outcome =
            resolve_muscle_group(&provider, &FallbackCatalog::builtin(), &query("back")).await;

        assert_eq!(outcome.label(), "fallback");
        assert_eq!(outcome.into_exercises().len(), 8);
    }

    #[tokio::test]
    async fn test_unsupported_muscle_gets_placeholder() {
        let provider = FixedProvider(Reply::Exercises(vec![]));
        let outcome =
            resolve_muscle_group(&provider, &FallbackCatalog::builtin(), &query("elbow")).await;

        match outcome {
            MuscleGroupOutcome::Placeholder { exercise, reason } => {
                assert_eq!(exercise.name, "No exercises found for elbow");
                assert_eq!(exercise.kind, "N/A");
                assert_eq!(exercise.equipment, "dumbbell");
                assert_eq!(exercise.difficulty, "intermediate");
                assert_eq!(reason, DegradeReason::Empty);
            }
            other => panic!("expected placeholder, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_error_records_reason() {
        let provider = FixedProvider(Reply::Fail);
        let outcome =
            resolve_muscle_group(&provider, &FallbackCatalog::new(), &query("chest")).await;

        match outcome {
            MuscleGroupOutcome::Placeholder { reason, .. } => {
                assert!(matches!(reason, DegradeReason::ProviderError(msg) if msg.contains("503")));
            }
            other => panic!("expected placeholder, got {:?}", other),
        }
    }
}

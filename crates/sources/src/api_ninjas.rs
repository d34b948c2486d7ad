//! Exercise-catalog provider backed by the API Ninjas exercises endpoint.
//!
//! `GET {base}/v1/exercises?muscle=..&difficulty=..&equipment=..` with the
//! credential in the `X-Api-Key` header. The reply is a JSON array of
//! exercise records.

use async_trait::async_trait;
use catalog::ExternalExercise;
use reqwest::Client;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::http::{ProviderConfig, build_client, send_json};
use crate::traits::{ExerciseProvider, ExerciseQuery};

const PROVIDER_NAME: &str = "api-ninjas";

/// HTTP exercise provider
#[derive(Clone)]
pub struct ApiNinjasExercises {
    client: Client,
    config: ProviderConfig,
}

impl ApiNinjasExercises {
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let client = build_client(PROVIDER_NAME, config.timeout)?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl ExerciseProvider for ApiNinjasExercises {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    #[instrument(skip(self), fields(muscle = %query.muscle))]
    async fn fetch_exercises(&self, query: &ExerciseQuery) -> Result<Vec<ExternalExercise>> {
        let request = self
            .client
            .get(self.config.endpoint("/v1/exercises"))
            .query(&[
                ("muscle", query.muscle.as_str()),
                ("difficulty", query.difficulty.as_str()),
                ("equipment", query.equipment.provider_value()),
            ])
            .header("X-Api-Key", &self.config.api_key);

        let exercises: Vec<ExternalExercise> = send_json(PROVIDER_NAME, request).await?;
        debug!("{} returned {} exercises", PROVIDER_NAME, exercises.len());
        Ok(exercises)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use crate::test_support::start_mock_provider;
    use axum::extract::Query;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::get;
    use axum::{Json, Router};
    use catalog::{Difficulty, Equipment};
    use serde_json::{Value, json};
    use std::collections::HashMap;
    use std::time::Duration;

    /// Echoes the query parameters back inside a single exercise record
    async fn mock_exercises(
        headers: HeaderMap,
        Query(params): Query<HashMap<String, String>>,
    ) -> (StatusCode, Json<Value>) {
        if headers.get("X-Api-Key").and_then(|v| v.to_str().ok()) != Some("test-key") {
            return (StatusCode::UNAUTHORIZED, Json(json!({"error": "bad key"})));
        }
        let muscle = params.get("muscle").cloned().unwrap_or_default();
        if muscle == "elbow" {
            return (StatusCode::OK, Json(json!([])));
        }
        (
            StatusCode::OK,
            Json(json!([{
                "name": format!("{} press", muscle),
                "type": "strength",
                "muscle": muscle,
                "equipment": params.get("equipment"),
                "difficulty": params.get("difficulty"),
                "instructions": "Press it."
            }])),
        )
    }

    fn query(muscle: &str) -> ExerciseQuery {
        ExerciseQuery {
            muscle: muscle.to_string(),
            difficulty: Difficulty::Expert,
            equipment: Equipment::BodyOnly,
        }
    }

    #[tokio::test]
    async fn test_fetch_sends_parameters_and_key() {
        let router = Router::new().route("/v1/exercises", get(mock_exercises));
        let (addr, handle) = start_mock_provider(router).await;

        let provider = ApiNinjasExercises::new(ProviderConfig::new(addr, "test-key")).unwrap();
        let exercises = provider.fetch_exercises(&query("chest")).await.unwrap();

        assert_eq!(exercises.len(), 1);
        assert_eq!(exercises[0].name, "chest press");
        assert_eq!(exercises[0].equipment, "body only");
        assert_eq!(exercises[0].difficulty, "expert");

        handle.abort();
    }

    #[tokio::test]
    async fn test_fetch_empty_list_is_ok() {
        let router = Router::new().route("/v1/exercises", get(mock_exercises));
        let (addr, handle) = start_mock_provider(router).await;

        let provider = ApiNinjasExercises::new(ProviderConfig::new(addr, "test-key")).unwrap();
        let exercises = provider.fetch_exercises(&query("elbow")).await.unwrap();
        assert!(exercises.is_empty());

        handle.abort();
    }

    #[tokio::test]
    async fn test_fetch_non_2xx_is_status_error() {
        let router = Router::new().route("/v1/exercises", get(mock_exercises));
        let (addr, handle) = start_mock_provider(router).await;

        let provider = ApiNinjasExercises::new(ProviderConfig::new(addr, "wrong-key")).unwrap();
        let result = provider.fetch_exercises(&query("chest")).await;

        match result {
            Err(ProviderError::Status { status, .. }) => assert_eq!(status, 401),
            other => panic!("expected status error, got {:?}", other),
        }

        handle.abort();
    }

    #[tokio::test]
    async fn test_fetch_unreachable_is_transport_error() {
        // Nothing listens on port 9 of the loopback interface
        let config = ProviderConfig::new("http://127.0.0.1:9", "test-key")
            .with_timeout(Duration::from_secs(2));
        let provider = ApiNinjasExercises::new(config).unwrap();

        let result = provider.fetch_exercises(&query("chest")).await;
        assert!(matches!(result, Err(ProviderError::Transport { .. })));
    }
}

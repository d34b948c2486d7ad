//! HTTP surface: routes, error responses and the listener.

use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use inference::PredictionResult;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::config::ServerConfig;
use crate::error::RecommendationError;
use crate::orchestrator::{MealPlanReply, RecommendationOrchestrator, WorkoutReply};

pub const HEALTH_TEXT: &str = "API is running";

type AppState = Arc<RecommendationOrchestrator>;

// Error handling
pub enum AppError {
    /// Body was not valid JSON
    BadBody(String),
    Flow(RecommendationError),
}

impl From<RecommendationError> for AppError {
    fn from(err: RecommendationError) -> Self {
        AppError::Flow(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadBody(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::BadBody(message) => (StatusCode::BAD_REQUEST, json!({ "error": message })),
            AppError::Flow(err) => {
                let status = StatusCode::from_u16(err.status_code())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                (status, error_body(err))
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Caller-facing body for a flow error. Provider diagnostics stay in the logs.
fn error_body(err: RecommendationError) -> Value {
    match err {
        RecommendationError::Validation(e) => json!({ "error": e.to_string() }),
        RecommendationError::Provider(_) => {
            json!({ "error": "Error fetching meal plan. Please try again later." })
        }
        RecommendationError::InferenceExecution { message, raw } => json!({
            "error": "Prediction failed",
            "details": message,
            "raw": raw,
        }),
        RecommendationError::InferenceParse { reason, raw } => json!({
            "error": "JSON parse error",
            "details": reason,
            "raw": raw,
        }),
        RecommendationError::InferenceTimeout(after) => json!({
            "error": "Prediction timed out",
            "details": format!("no reply within {:?}", after),
        }),
        RecommendationError::InferenceCancelled => json!({ "error": "Prediction cancelled" }),
    }
}

/// All routes, with request tracing. Any origin may call them, so the
/// browser front end can be served from a different port.
pub fn router(orchestrator: Arc<RecommendationOrchestrator>) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/mealplan", post(meal_plan))
        .route("/workoutplan", post(workout_plan))
        .route("/predict", post(predict))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(orchestrator)
}

async fn health() -> &'static str {
    HEALTH_TEXT
}

async fn meal_plan(
    State(orchestrator): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<MealPlanReply>, AppError> {
    let Json(body) = body?;
    Ok(Json(orchestrator.meal_plan(&body).await?))
}

async fn workout_plan(
    State(orchestrator): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<WorkoutReply>, AppError> {
    let Json(body) = body?;
    Ok(Json(orchestrator.workout_plan(&body).await?))
}

async fn predict(
    State(orchestrator): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<PredictionResult>, AppError> {
    let Json(body) = body?;

    // Cancelled if the client goes away and this handler is dropped
    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();

    Ok(Json(orchestrator.predict(&body, cancel).await?))
}

/// Wire everything from config and serve until Ctrl-C.
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    config.log_summary();

    let orchestrator = Arc::new(RecommendationOrchestrator::from_config(&config)?);
    let listener = TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address()))?;
    info!("Server ready on http://{}", listener.local_addr()?);

    axum::serve(listener, router(orchestrator))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => warn!("Shutdown signal received"),
        Err(e) => {
            error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

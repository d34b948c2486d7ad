//! Server crate for the FitRec recommendation service.
//!
//! This crate contains the orchestrator that coordinates the meal, workout
//! and prediction flows, the HTTP surface in front of it, and the
//! environment configuration that wires the two together.

pub mod config;
pub mod error;
pub mod http;
pub mod orchestrator;

use tracing_subscriber::EnvFilter;

pub use config::ServerConfig;
pub use error::RecommendationError;
pub use http::{AppError, router, serve};
pub use orchestrator::{MealPlanReply, RecommendationOrchestrator, WorkoutReply};

/// Log filter used when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "info,server=debug,pipeline=debug,sources=debug";

/// Initialize logging from `RUST_LOG`, falling back to `DEFAULT_LOG_FILTER`
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

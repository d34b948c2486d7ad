//! Errors surfaced by the recommendation flows.

use std::time::Duration;

use inference::InferenceError;
use pipeline::ValidationError;
use sources::ProviderError;
use thiserror::Error;

/// Everything a flow can fail with. Fallback substitution is not an error.
#[derive(Error, Debug)]
pub enum RecommendationError {
    /// Bad caller input; no outbound call was made
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The meal provider failed; the message is for server-side logs only
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Prediction failed: {message}")]
    InferenceExecution { message: String, raw: String },

    #[error("Prediction output could not be parsed: {reason}")]
    InferenceParse { reason: String, raw: String },

    #[error("Prediction timed out after {0:?}")]
    InferenceTimeout(Duration),

    #[error("Prediction was cancelled")]
    InferenceCancelled,
}

impl From<InferenceError> for RecommendationError {
    fn from(err: InferenceError) -> Self {
        match err {
            InferenceError::Execution { message, raw } => {
                RecommendationError::InferenceExecution { message, raw }
            }
            InferenceError::Parse { reason, raw } => {
                RecommendationError::InferenceParse { reason, raw }
            }
            InferenceError::Timeout(after) => RecommendationError::InferenceTimeout(after),
            InferenceError::Cancelled => RecommendationError::InferenceCancelled,
            InferenceError::Encode(e) => RecommendationError::InferenceExecution {
                message: e.to_string(),
                raw: String::new(),
            },
        }
    }
}

impl RecommendationError {
    /// HTTP status for this error: 400 for bad input, 500 otherwise.
    pub fn status_code(&self) -> u16 {
        match self {
            RecommendationError::Validation(_) => 400,
            _ => 500,
        }
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, RecommendationError>;

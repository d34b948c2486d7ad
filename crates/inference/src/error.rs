//! Errors raised by the inference bridge.

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when invoking the predictive program
#[derive(Error, Debug)]
pub enum InferenceError {
    /// The payload could not be serialized
    #[error("Failed to encode inference payload: {0}")]
    Encode(#[from] serde_json::Error),

    /// The program could not be spawned, or exited unsuccessfully
    #[error("Inference program failed: {message}")]
    Execution {
        message: String,
        /// Captured stdout, or stderr when stdout was empty
        raw: String,
    },

    /// The last non-blank stdout line was not a prediction payload
    #[error("Failed to parse inference output: {reason}")]
    Parse { reason: String, raw: String },

    /// The program did not exit within the configured timeout and was killed
    #[error("Inference program timed out after {0:?}")]
    Timeout(Duration),

    /// The caller cancelled the call; the program was killed
    #[error("Inference call was cancelled")]
    Cancelled,
}

impl InferenceError {
    /// Captured program output, when there is any
    pub fn raw_output(&self) -> Option<&str> {
        match self {
            InferenceError::Execution { raw, .. } | InferenceError::Parse { raw, .. } => {
                Some(raw.as_str())
            }
            _ => None,
        }
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, InferenceError>;

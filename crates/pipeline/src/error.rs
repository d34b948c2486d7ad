//! Validation errors raised by the request normalizer.

use thiserror::Error;

/// Malformed or missing caller input. Always detected before any outbound call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Request body was not a JSON object
    #[error("Request body must be a JSON object")]
    NotAnObject,

    /// A required field was absent, null or blank
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// A field was present with the wrong type or an unusable value
    #[error("Invalid value for {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    /// Equipment outside the allow-list
    #[error("Invalid equipment type: {value} (expected one of {allowed})")]
    InvalidEquipment { value: String, allowed: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, ValidationError>;

//! Bridge to the external symptom prediction program.
//!
//! The program receives the symptom payload as one JSON argument and prints
//! its prediction as the last line of stdout. This crate handles:
//! - Encoding the payload so it survives as a single argument
//! - Running the program with a timeout and a concurrency cap
//! - Parsing the reply into a typed `PredictionResult`

pub mod error;
pub mod payload;
pub mod process;

use async_trait::async_trait;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

pub use error::{InferenceError, Result};
pub use payload::{Prediction, PredictionResult, encode_payload, last_payload_line, parse_prediction};
pub use process::{DEFAULT_MAX_CONCURRENT, DEFAULT_TIMEOUT, InferenceCommand, ProcessInference};

/// Anything that can turn a symptom payload into a prediction.
#[async_trait]
pub trait InferenceProvider: Send + Sync {
    /// Run one prediction. `cancel` aborts the call and stops the program.
    async fn predict(&self, payload: &Value, cancel: CancellationToken) -> Result<PredictionResult>;
}

//! Wire format between the bridge and the predictive program.
//!
//! The request goes out as one compact JSON argument. The reply is the last
//! non-blank line of stdout; anything printed before it (model loading
//! messages, warnings) is ignored.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::error::{InferenceError, Result};

/// One ranked prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub disease: String,
    /// Kept as the program wrote it (integer or float)
    pub probability: Number,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The program's structured reply, returned to callers unchanged.
///
/// Fields beyond the two required ones are preserved in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    pub top_predictions: Vec<Prediction>,
    pub recommendation: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Serialize a payload as a single-line argument.
pub fn encode_payload(payload: &Value) -> Result<String> {
    let encoded = serde_json::to_string(payload)?;
    Ok(encoded.replace(['\n', '\r'], ""))
}

/// The last line of `stdout` that is not blank.
pub fn last_payload_line(stdout: &str) -> Option<&str> {
    stdout.lines().rev().map(str::trim).find(|line| !line.is_empty())
}

/// Parse captured stdout into a prediction.
pub fn parse_prediction(stdout: &str) -> Result<PredictionResult> {
    let line = last_payload_line(stdout).ok_or_else(|| InferenceError::Parse {
        reason: "program produced no output".to_string(),
        raw: stdout.to_string(),
    })?;

    serde_json::from_str::<PredictionResult>(line).map_err(|e| InferenceError::Parse {
        reason: describe_parse_failure(line, e),
        raw: stdout.to_string(),
    })
}

/// Surface the program's own `{"error": ..., "details": ...}` report when present.
fn describe_parse_failure(line: &str, err: serde_json::Error) -> String {
    match serde_json::from_str::<Value>(line) {
        Ok(Value::Object(fields)) if fields.contains_key("error") => {
            let details = fields.get("details").and_then(Value::as_str).unwrap_or("");
            format!("program reported {}: {}", fields["error"], details)
        }
        _ => err.to_string(),
    }
}

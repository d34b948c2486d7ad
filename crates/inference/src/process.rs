//! Runs the predictive program as a child process.
//!
//! The payload is passed as a single argv element after the configured
//! arguments; no shell is involved. Each call is bounded by a timeout and a
//! shared concurrency limit, and the child is killed on timeout or
//! cancellation.

use std::process::Stdio;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde_json::Value;
use tokio::process::Command;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::InferenceProvider;
use crate::error::{InferenceError, Result};
use crate::payload::{PredictionResult, encode_payload, parse_prediction};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_MAX_CONCURRENT: usize = 4;

/// Program plus leading arguments, e.g. `python3 ../ml_model/predict.py`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl InferenceCommand {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

/// Inference bridge backed by an external program.
pub struct ProcessInference {
    command: InferenceCommand,
    timeout: Duration,
    permits: Arc<Semaphore>,
}

impl ProcessInference {
    pub fn new(command: InferenceCommand) -> Self {
        Self {
            command,
            timeout: DEFAULT_TIMEOUT,
            permits: Arc::new(Semaphore::new(DEFAULT_MAX_CONCURRENT)),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Cap on simultaneously running programs (minimum 1)
    pub fn with_max_concurrent(mut self, max: usize) -> Self {
        self.permits = Arc::new(Semaphore::new(max.max(1)));
        self
    }

    pub fn command(&self) -> &InferenceCommand {
        &self.command
    }

    async fn run(&self, argument: String) -> Result<String> {
        let mut command = Command::new(&self.command.program);
        command
            .args(&self.command.args)
            .arg(argument)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = command.spawn().map_err(|e| InferenceError::Execution {
            message: format!("failed to start {}: {}", self.command.program, e),
            raw: String::new(),
        })?;

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| InferenceError::Execution {
                message: format!("failed to collect output: {}", e),
                raw: String::new(),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if !stderr.trim().is_empty() {
            debug!("Inference stderr: {}", stderr.trim());
        }

        if !output.status.success() {
            let raw = if stdout.trim().is_empty() { stderr } else { stdout };
            return Err(InferenceError::Execution {
                message: format!("program exited with {}", output.status),
                raw,
            });
        }

        Ok(stdout)
    }
}

#[async_trait]
impl InferenceProvider for ProcessInference {
    #[instrument(skip(self, payload, cancel), fields(program = %self.command.program))]
    async fn predict(&self, payload: &Value, cancel: CancellationToken) -> Result<PredictionResult> {
        let argument = encode_payload(payload)?;

        let _permit = tokio::select! {
            permit = self.permits.acquire() => permit.map_err(|_| InferenceError::Cancelled)?,
            _ = cancel.cancelled() => return Err(InferenceError::Cancelled),
        };

        let start_time = Instant::now();
        // Dropping the run future drops the child, which kills it.
        let stdout = tokio::select! {
            result = tokio::time::timeout(self.timeout, self.run(argument)) => match result {
                Ok(output) => output?,
                Err(_) => {
                    warn!("Inference program exceeded {:?}, killed", self.timeout);
                    return Err(InferenceError::Timeout(self.timeout));
                }
            },
            _ = cancel.cancelled() => {
                info!("Inference call cancelled after {:.2?}", start_time.elapsed());
                return Err(InferenceError::Cancelled);
            }
        };

        let prediction = parse_prediction(&stdout)?;
        info!(
            "Inference returned {} predictions in {:.2?}",
            prediction.top_predictions.len(),
            start_time.elapsed()
        );
        Ok(prediction)
    }
}

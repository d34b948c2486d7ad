//! Environment configuration for the server.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use inference::InferenceCommand;
use sources::ProviderConfig;
use tracing::info;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_SPOONACULAR_BASE_URL: &str = "https://api.spoonacular.com";
pub const DEFAULT_API_NINJAS_BASE_URL: &str = "https://api.api-ninjas.com";
pub const DEFAULT_INFERENCE_PROGRAM: &str = "python3";
pub const DEFAULT_INFERENCE_ARGS: &str = "../ml_model/predict.py";

/// Everything needed to wire up the orchestrator and the HTTP listener.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub spoonacular: ProviderConfig,
    pub api_ninjas: ProviderConfig,
    pub inference: InferenceCommand,
    pub inference_timeout: Duration,
    pub inference_max_concurrent: usize,
    pub exercise_fan_out: usize,
    pub fallback_catalog_path: Option<PathBuf>,
}

impl ServerConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any key lookup. Unset or blank keys take defaults;
    /// numeric keys that do not parse are an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let text = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let provider_timeout = Duration::from_secs(number(&get, "PROVIDER_TIMEOUT_SECS", 10)?);

        let spoonacular = ProviderConfig::new(
            text("SPOONACULAR_BASE_URL", DEFAULT_SPOONACULAR_BASE_URL),
            text("SPOONACULAR_API_KEY", ""),
        )
        .with_timeout(provider_timeout);

        let api_ninjas = ProviderConfig::new(
            text("API_NINJAS_BASE_URL", DEFAULT_API_NINJAS_BASE_URL),
            text("API_NINJAS_KEY", ""),
        )
        .with_timeout(provider_timeout);

        let inference = InferenceCommand::new(
            text("INFERENCE_PROGRAM", DEFAULT_INFERENCE_PROGRAM),
            text("INFERENCE_ARGS", DEFAULT_INFERENCE_ARGS)
                .split_whitespace()
                .map(str::to_string)
                .collect(),
        );

        let inference_max_concurrent = number(&get, "INFERENCE_MAX_CONCURRENT", 4)?;
        let exercise_fan_out = number(&get, "EXERCISE_FANOUT", 4)?;
        if inference_max_concurrent == 0 || exercise_fan_out == 0 {
            bail!("INFERENCE_MAX_CONCURRENT and EXERCISE_FANOUT must be at least 1");
        }

        Ok(Self {
            host: text("HOST", DEFAULT_HOST),
            port: number(&get, "PORT", DEFAULT_PORT)?,
            spoonacular,
            api_ninjas,
            inference,
            inference_timeout: Duration::from_secs(number(&get, "INFERENCE_TIMEOUT_SECS", 30)?),
            inference_max_concurrent,
            exercise_fan_out,
            fallback_catalog_path: get("FALLBACK_CATALOG_PATH").map(PathBuf::from),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Log the effective settings. Credentials are reported as set/unset only.
    pub fn log_summary(&self) {
        info!("Listen address: {}", self.bind_address());
        info!(
            "Meal provider: {} (key {})",
            self.spoonacular.base_url,
            key_state(&self.spoonacular.api_key)
        );
        info!(
            "Exercise provider: {} (key {})",
            self.api_ninjas.base_url,
            key_state(&self.api_ninjas.api_key)
        );
        info!(
            "Inference: {} {} (timeout {:?}, max {} concurrent)",
            self.inference.program,
            self.inference.args.join(" "),
            self.inference_timeout,
            self.inference_max_concurrent
        );
        info!("Exercise fan-out: {}", self.exercise_fan_out);
        match &self.fallback_catalog_path {
            Some(path) => info!("Fallback catalog: {}", path.display()),
            None => info!("Fallback catalog: built-in"),
        }
    }
}

fn key_state(key: &str) -> &'static str {
    if key.is_empty() { "unset" } else { "set" }
}

fn number<T, G>(get: &G, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid value for {}: {:?}", key, raw)),
        None => Ok(default),
    }
}

//! Shared HTTP plumbing for the provider implementations.

use std::fmt;
use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use crate::error::{ProviderError, Result};

/// Connection settings for one provider.
#[derive(Clone)]
pub struct ProviderConfig {
    /// Scheme and host, without a trailing slash (e.g. "https://api.spoonacular.com")
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl ProviderConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Override the request timeout (default: 10s)
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

pub(crate) fn build_client(provider: &str, timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ProviderError::ClientBuild {
            provider: provider.to_string(),
            source: e,
        })
}

/// Send a request and decode a 2xx JSON body. No retries.
pub(crate) async fn send_json<T>(provider: &str, request: RequestBuilder) -> Result<T>
where
    T: DeserializeOwned,
{
    let response = request.send().await.map_err(|e| {
        let e = e.without_url();
        error!("{} request failed: {}", provider, e);
        ProviderError::Transport {
            provider: provider.to_string(),
            source: e,
        }
    })?;

    let status = response.status();
    debug!("{} responded with status {}", provider, status);

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        error!("{} request failed - status: {}, body: {}", provider, status, body);
        return Err(ProviderError::Status {
            provider: provider.to_string(),
            status: status.as_u16(),
            body,
        });
    }

    response.json::<T>().await.map_err(|e| {
        let reason = e.without_url().to_string();
        error!("Failed to parse {} response: {}", provider, reason);
        ProviderError::Decode {
            provider: provider.to_string(),
            reason,
        }
    })
}

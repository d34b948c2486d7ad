//! Errors raised by the provider gateway.

use thiserror::Error;

/// A failed call to an external data provider.
///
/// Messages carry full diagnostics for server-side logs; they are never
/// forwarded to callers verbatim. Transport errors have their URL stripped so
/// query-string credentials do not end up in logs.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The HTTP client could not be constructed
    #[error("Failed to build HTTP client for {provider}: {source}")]
    ClientBuild {
        provider: String,
        #[source]
        source: reqwest::Error,
    },

    /// Connection, DNS, TLS or timeout failure
    #[error("Request to {provider} failed: {source}")]
    Transport {
        provider: String,
        #[source]
        source: reqwest::Error,
    },

    /// The provider answered with a non-2xx status
    #[error("{provider} returned status {status}: {body}")]
    Status {
        provider: String,
        status: u16,
        body: String,
    },

    /// The provider answered 2xx but the body had an unexpected shape
    #[error("Invalid response from {provider}: {reason}")]
    Decode { provider: String, reason: String },
}

impl ProviderError {
    pub fn provider(&self) -> &str {
        match self {
            ProviderError::ClientBuild { provider, .. }
            | ProviderError::Transport { provider, .. }
            | ProviderError::Status { provider, .. }
            | ProviderError::Decode { provider, .. } => provider,
        }
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, ProviderError>;

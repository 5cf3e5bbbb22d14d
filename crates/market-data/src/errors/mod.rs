//! Error types for the market data crate.

use thiserror::Error;

/// Errors that can occur while talking to an upstream provider.
///
/// None of these are retried: a failed call fails the request that issued it.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The provider rate limited the request (HTTP 429).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// The request could not be sent, or the provider answered with a
    /// non-success status.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The response body could not be read or is not valid JSON.
    #[error("Parse failed: {provider} - {message}")]
    ParseFailed {
        /// The provider whose body failed to parse
        provider: String,
        /// Description of the parse failure
        message: String,
    },
}

impl MarketDataError {
    /// The provider this error came from.
    pub fn provider(&self) -> &str {
        match self {
            Self::RateLimited { provider }
            | Self::Timeout { provider }
            | Self::ProviderError { provider, .. }
            | Self::ParseFailed { provider, .. } => provider,
        }
    }
}

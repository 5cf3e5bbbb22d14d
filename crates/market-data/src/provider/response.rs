//! Transport and parse phases of an upstream call.
//!
//! Sending a request and parsing its body are separate awaitable steps so a
//! caller can join every transport response before it starts on any body.

use reqwest::{RequestBuilder, Response, StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::errors::MarketDataError;

/// Inspects a parsed body for provider-level notices. Never fails.
pub(crate) type BodyInspector = fn(&str, &Value);

/// A response whose status has been checked and whose body is still unread.
pub struct UpstreamResponse {
    provider: &'static str,
    endpoint: String,
    inner: Response,
    inspect: BodyInspector,
}

impl UpstreamResponse {
    /// Read the body and parse it as JSON.
    pub async fn json(self) -> Result<Value, MarketDataError> {
        let text = self
            .inner
            .text()
            .await
            .map_err(|e| MarketDataError::ParseFailed {
                provider: self.provider.to_string(),
                message: format!("Failed to read {} response: {}", self.endpoint, e),
            })?;

        let value: Value =
            serde_json::from_str(&text).map_err(|e| MarketDataError::ParseFailed {
                provider: self.provider.to_string(),
                message: format!("Failed to parse {} response: {}", self.endpoint, e),
            })?;

        (self.inspect)(&self.endpoint, &value);
        Ok(value)
    }
}

/// Send a request and map transport failures and non-success statuses.
pub(crate) async fn send(
    provider: &'static str,
    endpoint: String,
    request: RequestBuilder,
    inspect: BodyInspector,
) -> Result<UpstreamResponse, MarketDataError> {
    let response = request.send().await.map_err(|e| {
        if e.is_timeout() {
            MarketDataError::Timeout {
                provider: provider.to_string(),
            }
        } else {
            MarketDataError::ProviderError {
                provider: provider.to_string(),
                message: format!("Request to {} failed: {}", endpoint, e),
            }
        }
    })?;

    let status = response.status();
    debug!("{} {} responded with {}", provider, endpoint, status);

    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(MarketDataError::RateLimited {
            provider: provider.to_string(),
        });
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(MarketDataError::ProviderError {
            provider: provider.to_string(),
            message: format!("{} returned HTTP {} - {}", endpoint, status, body),
        });
    }

    Ok(UpstreamResponse {
        provider,
        endpoint,
        inner: response,
        inspect,
    })
}

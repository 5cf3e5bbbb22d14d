//! Alpha Vantage provider.
//!
//! Serves the market snapshot (TOP_GAINERS_LOSERS) and the fundamentals side
//! of a stock bundle: OVERVIEW, INCOME_STATEMENT and NEWS_SENTIMENT.
//!
//! Alpha Vantage reports throttling and invalid keys with HTTP 200 and a
//! `Note`, `Information` or `Error Message` field. Those bodies are passed
//! through unchanged; the notice is only logged.

use std::time::Duration;

use reqwest::{Client, Url};
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::MarketDataError;
use crate::provider::response::{send, UpstreamResponse};

pub const BASE_URL: &str = "https://www.alphavantage.co/query";
pub const PROVIDER_ID: &str = "ALPHA_VANTAGE";

const NOTICE_FIELDS: [&str; 3] = ["Error Message", "Note", "Information"];

/// Alpha Vantage HTTP client.
pub struct AlphaVantageProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl AlphaVantageProvider {
    /// Create a provider against the public Alpha Vantage endpoint.
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, BASE_URL)
    }

    /// Create a provider against a custom endpoint (proxies, local stubs).
    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_key,
            base_url: base_url.into(),
        }
    }

    pub fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn build_url(&self, params: &[(&str, &str)]) -> Result<Url, MarketDataError> {
        let mut all_params: Vec<(&str, &str)> = params.to_vec();
        all_params.push(("apikey", &self.api_key));

        Url::parse_with_params(&self.base_url, &all_params).map_err(|e| {
            MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to build URL: {}", e),
            }
        })
    }

    /// Issue one query. `params` must contain the `function` parameter.
    async fn fetch(&self, params: &[(&str, &str)]) -> Result<UpstreamResponse, MarketDataError> {
        let url = self.build_url(params)?;
        let function = params
            .iter()
            .find(|(key, _)| *key == "function")
            .map(|(_, value)| value.to_string())
            .unwrap_or_default();

        debug!(
            "Alpha Vantage request: {}",
            url.as_str().replace(&self.api_key, "***")
        );

        send(PROVIDER_ID, function, self.client.get(url), log_api_notice).await
    }

    /// Top gainers, top losers and most actively traded tickers.
    pub async fn top_gainers_losers(&self) -> Result<UpstreamResponse, MarketDataError> {
        self.fetch(&[("function", "TOP_GAINERS_LOSERS")]).await
    }

    /// Company overview (fundamentals, ratios, 52 week range, moving averages).
    pub async fn company_overview(&self, symbol: &str) -> Result<UpstreamResponse, MarketDataError> {
        self.fetch(&[("function", "OVERVIEW"), ("symbol", symbol)])
            .await
    }

    /// Annual and quarterly income statements.
    pub async fn income_statement(&self, symbol: &str) -> Result<UpstreamResponse, MarketDataError> {
        self.fetch(&[("function", "INCOME_STATEMENT"), ("symbol", symbol)])
            .await
    }

    /// News feed with per-article sentiment for a ticker.
    pub async fn news_sentiment(&self, symbol: &str) -> Result<UpstreamResponse, MarketDataError> {
        self.fetch(&[("function", "NEWS_SENTIMENT"), ("tickers", symbol)])
            .await
    }
}

/// Return the first provider notice carried in a 200 response, if any.
fn api_notice(body: &Value) -> Option<(&'static str, &str)> {
    NOTICE_FIELDS
        .iter()
        .find_map(|field| body.get(*field).and_then(Value::as_str).map(|msg| (*field, msg)))
}

fn log_api_notice(function: &str, body: &Value) {
    if let Some((field, msg)) = api_notice(body) {
        warn!("Alpha Vantage {} {}: {}", function, field.to_lowercase(), msg);
    }
}

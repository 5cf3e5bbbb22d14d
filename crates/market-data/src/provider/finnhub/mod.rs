//! Finnhub provider.
//!
//! Serves the market side of a stock bundle:
//! - Real-time quote via `/quote`
//! - Analyst recommendation trends via `/stock/recommendation`
//! - Daily OHLCV candles via `/stock/candle`
//!
//! API documentation: https://finnhub.io/docs/api

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::MarketDataError;
use crate::provider::response::{send, UpstreamResponse};

pub const BASE_URL: &str = "https://finnhub.io/api/v1";
pub const PROVIDER_ID: &str = "FINNHUB";

/// Length of the trailing chart window: 365 days in seconds.
pub const CHART_LOOKBACK_SECS: i64 = 31_536_000;

/// Unix-second bounds of a candle request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandleWindow {
    pub from: i64,
    pub to: i64,
}

impl CandleWindow {
    /// The year ending at `now`.
    pub fn trailing_year(now: DateTime<Utc>) -> Self {
        let to = now.timestamp();
        Self {
            from: to - CHART_LOOKBACK_SECS,
            to,
        }
    }
}

/// Finnhub HTTP client.
pub struct FinnhubProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl FinnhubProvider {
    /// Create a provider against the public Finnhub endpoint.
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, BASE_URL)
    }

    /// Create a provider against a custom endpoint (proxies, local stubs).
    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        let base_url: String = base_url.into();
        Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    /// Make a GET request to the Finnhub API.
    async fn fetch(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<UpstreamResponse, MarketDataError> {
        let url = format!("{}{}", self.base_url, endpoint);

        // API key as header rather than query param keeps it out of URLs
        let request = self
            .client
            .get(&url)
            .header("X-Finnhub-Token", &self.api_key)
            .query(params);

        debug!("Finnhub request: {} with {} params", endpoint, params.len());

        send(PROVIDER_ID, endpoint.to_string(), request, log_api_error).await
    }

    /// Current price, change, day range and volume.
    pub async fn quote(&self, symbol: &str) -> Result<UpstreamResponse, MarketDataError> {
        self.fetch("/quote", &[("symbol", symbol)]).await
    }

    /// Monthly recommendation trends, most recent period first.
    pub async fn recommendation_trends(
        &self,
        symbol: &str,
    ) -> Result<UpstreamResponse, MarketDataError> {
        self.fetch("/stock/recommendation", &[("symbol", symbol)])
            .await
    }

    /// Daily candles over `window`.
    pub async fn daily_candles(
        &self,
        symbol: &str,
        window: CandleWindow,
    ) -> Result<UpstreamResponse, MarketDataError> {
        let from_ts = window.from.to_string();
        let to_ts = window.to.to_string();

        let params = [
            ("symbol", symbol),
            ("resolution", "D"),
            ("from", from_ts.as_str()),
            ("to", to_ts.as_str()),
        ];

        self.fetch("/stock/candle", &params).await
    }
}

fn log_api_error(endpoint: &str, body: &Value) {
    if let Some(msg) = body.get("error").and_then(Value::as_str) {
        warn!("Finnhub {} error: {}", endpoint, msg);
    }
    if body.get("s").and_then(Value::as_str) == Some("no_data") {
        debug!("Finnhub {} returned no_data", endpoint);
    }
}

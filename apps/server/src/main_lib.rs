use std::sync::Arc;

use crate::config::Config;
use lanza_market_data::{AlphaVantageProvider, FinnhubProvider};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Shared, read-only handler dependencies. A provider is absent when its
/// credential is not configured.
pub struct AppState {
    pub alpha_vantage: Option<Arc<AlphaVantageProvider>>,
    pub finnhub: Option<Arc<FinnhubProvider>>,
}

pub fn init_tracing() {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub fn build_state(config: &Config) -> Arc<AppState> {
    let alpha_vantage = config.alpha_vantage_api_key.clone().map(|key| {
        let provider = match &config.alpha_vantage_base_url {
            Some(url) => AlphaVantageProvider::with_base_url(key, url.clone()),
            None => AlphaVantageProvider::new(key),
        };
        Arc::new(provider)
    });
    if alpha_vantage.is_none() {
        tracing::warn!("ALPHA_VANTAGE_API_KEY is not set; market endpoints will fail");
    }

    let finnhub = config.finnhub_api_key.clone().map(|key| {
        let provider = match &config.finnhub_base_url {
            Some(url) => FinnhubProvider::with_base_url(key, url.clone()),
            None => FinnhubProvider::new(key),
        };
        Arc::new(provider)
    });
    if finnhub.is_none() {
        tracing::warn!("FINNHUB_API_KEY is not set; /stock-data will fail");
    }

    Arc::new(AppState {
        alpha_vantage,
        finnhub,
    })
}

//! All-or-nothing fetches across providers.
//!
//! The stock documents are gathered in two joined phases. Phase one waits for
//! the six transport responses, phase two for the six parsed bodies. Either
//! join fails as soon as one member fails, and the remaining futures are
//! dropped with it.

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::debug;

use crate::errors::MarketDataError;
use crate::provider::alpha_vantage::AlphaVantageProvider;
use crate::provider::finnhub::{CandleWindow, FinnhubProvider};

/// The six upstream documents behind one stock bundle, as parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct RawStockDocuments {
    pub overview: Value,
    pub income_statement: Value,
    pub news_sentiment: Value,
    pub quote: Value,
    pub recommendations: Value,
    pub candles: Value,
}

/// Fetch and parse the TOP_GAINERS_LOSERS document.
pub async fn fetch_market_snapshot(
    alpha_vantage: &AlphaVantageProvider,
) -> Result<Value, MarketDataError> {
    alpha_vantage.top_gainers_losers().await?.json().await
}

/// Fetch every document needed for `symbol`, with the chart window ending at
/// `now`.
pub async fn fetch_stock_documents(
    alpha_vantage: &AlphaVantageProvider,
    finnhub: &FinnhubProvider,
    symbol: &str,
    now: DateTime<Utc>,
) -> Result<RawStockDocuments, MarketDataError> {
    let window = CandleWindow::trailing_year(now);

    let (overview, income_statement, news_sentiment, quote, recommendations, candles) = tokio::try_join!(
        alpha_vantage.company_overview(symbol),
        alpha_vantage.income_statement(symbol),
        alpha_vantage.news_sentiment(symbol),
        finnhub.quote(symbol),
        finnhub.recommendation_trends(symbol),
        finnhub.daily_candles(symbol, window),
    )?;

    debug!("All upstream responses received for {}", symbol);

    let (overview, income_statement, news_sentiment, quote, recommendations, candles) = tokio::try_join!(
        overview.json(),
        income_statement.json(),
        news_sentiment.json(),
        quote.json(),
        recommendations.json(),
        candles.json(),
    )?;

    Ok(RawStockDocuments {
        overview,
        income_statement,
        news_sentiment,
        quote,
        recommendations,
        candles,
    })
}

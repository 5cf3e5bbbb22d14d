use lanza_market_data::{normalize, signals, RawStockDocuments};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

/// Home page snapshot: top gainers and most active tickers.
#[derive(Serialize, ToSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MoversResponse {
    #[schema(value_type = Vec<Object>)]
    pub top_gainers: Vec<Value>,
    #[schema(value_type = Vec<Object>)]
    pub most_active: Vec<Value>,
}

impl MoversResponse {
    pub fn from_snapshot(snapshot: &Value) -> Self {
        Self {
            top_gainers: normalize::top_gainers(snapshot),
            most_active: normalize::most_active(snapshot),
        }
    }
}

#[derive(Serialize, ToSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StockFlags {
    pub is_unusual_volume: bool,
}

/// Everything the client shows for one symbol.
#[derive(Serialize, ToSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StockBundle {
    #[schema(value_type = Object)]
    pub overview: Value,
    #[schema(value_type = Object)]
    pub income_statement: Value,
    #[schema(value_type = Vec<Object>)]
    pub news: Vec<Value>,
    /// Serialized as `null` when there is no news.
    pub avg_news_sentiment: Option<String>,
    #[schema(value_type = Object)]
    pub quote: Value,
    #[schema(value_type = Object)]
    pub recommendations: Value,
    #[schema(value_type = Object)]
    pub chart_data: Value,
    pub flags: StockFlags,
}

impl From<RawStockDocuments> for StockBundle {
    fn from(docs: RawStockDocuments) -> Self {
        let news = normalize::news_feed(&docs.news_sentiment);
        let avg_news_sentiment = signals::average_sentiment(&news);
        let flags = StockFlags {
            is_unusual_volume: signals::is_unusual_volume(&docs.quote),
        };

        Self {
            overview: docs.overview,
            income_statement: normalize::latest_income_report(&docs.income_statement),
            news,
            avg_news_sentiment,
            quote: docs.quote,
            recommendations: normalize::latest_recommendation(&docs.recommendations),
            chart_data: docs.candles,
            flags,
        }
    }
}

//! Shape normalization for upstream documents.
//!
//! Every function here is total: unexpected shapes fall back to an empty
//! array or an empty object instead of failing.

use serde_json::{Map, Value};

/// Maximum number of tickers kept per market movers list.
pub const MAX_MOVERS: usize = 20;

/// First `limit` elements of the array under `field`, or an empty list when
/// the field is absent or not an array.
pub fn truncated_list(document: &Value, field: &str, limit: usize) -> Vec<Value> {
    document
        .get(field)
        .and_then(Value::as_array)
        .map(|items| items.iter().take(limit).cloned().collect())
        .unwrap_or_default()
}

pub fn top_gainers(document: &Value) -> Vec<Value> {
    truncated_list(document, "top_gainers", MAX_MOVERS)
}

pub fn most_active(document: &Value) -> Vec<Value> {
    truncated_list(document, "most_actively_traded", MAX_MOVERS)
}

/// Most recent quarterly report, or `{}` when there is none.
pub fn latest_income_report(document: &Value) -> Value {
    first_or_empty_object(document.get("quarterlyReports"))
}

/// News articles of a NEWS_SENTIMENT document, or `[]`.
pub fn news_feed(document: &Value) -> Vec<Value> {
    document
        .get("feed")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

/// Most recent recommendation period, or `{}` when there is none.
pub fn latest_recommendation(document: &Value) -> Value {
    first_or_empty_object(Some(document))
}

fn first_or_empty_object(value: Option<&Value>) -> Value {
    value
        .and_then(Value::as_array)
        .and_then(|items| items.first())
        .cloned()
        .unwrap_or_else(|| Value::Object(Map::new()))
}

//! Values derived from upstream documents.

use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;

/// Daily volume above which a quote is flagged as unusual.
pub const UNUSUAL_VOLUME_THRESHOLD: f64 = 10_000_000.0;

/// Mean `overall_sentiment_score` of a news feed formatted with two decimals.
///
/// An article without a usable score counts as 0 and still counts toward the
/// denominator. Midpoints of the exact binary mean round away from zero.
/// Returns `None` for an empty feed.
pub fn average_sentiment(feed: &[Value]) -> Option<String> {
    if feed.is_empty() {
        return None;
    }

    let sum: f64 = feed
        .iter()
        .map(|item| item.get("overall_sentiment_score").and_then(as_number).unwrap_or(0.0))
        .sum();

    Some(format_two_places(sum / feed.len() as f64))
}

fn format_two_places(value: f64) -> String {
    match Decimal::from_f64_retain(value) {
        Some(exact) => format!(
            "{:.2}",
            exact.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        ),
        None => format!("{:.2}", value),
    }
}

/// Whether the quote's volume (`v`) is strictly above the threshold.
pub fn is_unusual_volume(quote: &Value) -> bool {
    quote
        .get("v")
        .and_then(as_number)
        .is_some_and(|volume| volume > UNUSUAL_VOLUME_THRESHOLD)
}

// Providers are not consistent about numbers vs numeric strings.
fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

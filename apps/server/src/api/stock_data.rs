use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use lanza_market_data::fetch_stock_documents;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
    models::StockBundle,
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub(crate) struct StockQuery {
    /// Ticker symbol, e.g. `AAPL`.
    symbol: Option<String>,
}

#[utoipa::path(
    get,
    path = "/stock-data",
    params(StockQuery),
    responses(
        (status = 200, body = StockBundle),
        (status = 400, description = "Missing or malformed symbol"),
        (status = 500, description = "Credential missing or upstream failure")
    )
)]
pub(crate) async fn get_stock_data(
    State(state): State<Arc<AppState>>,
    query: Result<Query<StockQuery>, QueryRejection>,
) -> ApiResult<Json<StockBundle>> {
    let Query(query) = query.map_err(|rejection| {
        ApiError::BadRequest(format!("Invalid query: {}", rejection.body_text()))
    })?;

    let symbol = query
        .symbol
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Missing stock symbol".to_string()))?;

    let (Some(alpha_vantage), Some(finnhub)) =
        (state.alpha_vantage.as_deref(), state.finnhub.as_deref())
    else {
        return Err(ApiError::Configuration(
            "Server configuration error: API keys missing".to_string(),
        ));
    };

    let documents = fetch_stock_documents(alpha_vantage, finnhub, symbol, Utc::now())
        .await
        .map_err(|err| {
            tracing::error!(
                provider = err.provider(),
                "Error fetching stock data for {}: {}",
                symbol,
                err
            );
            ApiError::Upstream("Failed to fetch stock data".to_string())
        })?;

    Ok(Json(StockBundle::from(documents)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/stock-data", get(get_stock_data))
}

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use lanza_market_data::fetch_market_snapshot;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
    models::MoversResponse,
};

#[utoipa::path(
    get,
    path = "/market-movers",
    responses(
        (status = 200, body = MoversResponse),
        (status = 500, description = "Credential missing or upstream failure")
    )
)]
pub(crate) async fn get_market_movers(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<MoversResponse>> {
    let alpha_vantage = state.alpha_vantage.as_deref().ok_or_else(|| {
        ApiError::Configuration("Alpha Vantage API key not configured".to_string())
    })?;

    let snapshot = fetch_market_snapshot(alpha_vantage).await.map_err(|err| {
        tracing::error!(provider = err.provider(), "Error fetching market movers: {}", err);
        ApiError::Upstream("Failed to fetch market movers".to_string())
    })?;

    Ok(Json(MoversResponse::from_snapshot(&snapshot)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/market-movers", get(get_market_movers))
}

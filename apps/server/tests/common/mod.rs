//! Local stand-in for Alpha Vantage and Finnhub.
//!
//! Alpha Vantage requests (`/query`) are keyed by their `function` parameter,
//! Finnhub requests by path.

#![allow(dead_code)]

use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    body::{to_bytes, Body},
    extract::{Query, State},
    http::{HeaderMap, Request, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use lanza_server::{api::app_router, build_state, config::Config};
use serde_json::{json, Value};
use tower::ServiceExt;

pub const AV_KEY: &str = "av-test-key";
pub const FH_KEY: &str = "fh-test-key";

#[derive(Clone)]
pub enum Reply {
    Json(Value),
    Status(u16),
    Raw(&'static str),
    Delayed(Duration, Value),
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub key: String,
    pub query: HashMap<String, String>,
    pub finnhub_token: Option<String>,
}

#[derive(Default)]
struct StubState {
    replies: Mutex<HashMap<String, Reply>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

pub struct StubUpstream {
    pub addr: SocketAddr,
    state: Arc<StubState>,
}

impl StubUpstream {
    pub async fn spawn() -> Self {
        let state = Arc::new(StubState::default());
        {
            let mut replies = state.replies.lock().unwrap();
            for (key, body) in default_bodies() {
                replies.insert(key.to_string(), Reply::Json(body));
            }
        }

        let app = Router::new().fallback(handle).with_state(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    pub fn reply(&self, key: &str, reply: Reply) {
        self.state
            .replies
            .lock()
            .unwrap()
            .insert(key.to_string(), reply);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn request_for(&self, key: &str) -> Option<RecordedRequest> {
        self.requests().into_iter().find(|r| r.key == key)
    }

    /// Router wired to this stub with the given credentials.
    pub fn app(&self, alpha_vantage_key: Option<&str>, finnhub_key: Option<&str>) -> Router {
        let mut vars: HashMap<&str, String> = HashMap::new();
        vars.insert("ALPHA_VANTAGE_BASE_URL", format!("http://{}/query", self.addr));
        vars.insert("FINNHUB_BASE_URL", format!("http://{}", self.addr));
        if let Some(key) = alpha_vantage_key {
            vars.insert("ALPHA_VANTAGE_API_KEY", key.to_string());
        }
        if let Some(key) = finnhub_key {
            vars.insert("FINNHUB_API_KEY", key.to_string());
        }

        let config = Config::from_lookup(|key| vars.get(key).cloned()).unwrap();
        app_router(build_state(&config), &config)
    }
}

async fn handle(
    State(state): State<Arc<StubState>>,
    uri: Uri,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let key = if uri.path() == "/query" {
        query.get("function").cloned().unwrap_or_default()
    } else {
        uri.path().to_string()
    };

    state.requests.lock().unwrap().push(RecordedRequest {
        key: key.clone(),
        query,
        finnhub_token: headers
            .get("x-finnhub-token")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    });

    let reply = state.replies.lock().unwrap().get(&key).cloned();
    match reply {
        Some(Reply::Json(body)) => Json(body).into_response(),
        Some(Reply::Status(code)) => StatusCode::from_u16(code).unwrap().into_response(),
        Some(Reply::Raw(text)) => text.into_response(),
        Some(Reply::Delayed(delay, body)) => {
            tokio::time::sleep(delay).await;
            Json(body).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

pub fn tickers(prefix: &str, n: usize) -> Vec<Value> {
    (0..n)
        .map(|i| {
            json!({
                "ticker": format!("{}{}", prefix, i),
                "price": "12.34",
                "change_percentage": "5.1%",
                "volume": "1000000"
            })
        })
        .collect()
}

pub fn default_bodies() -> Vec<(&'static str, Value)> {
    vec![
        (
            "TOP_GAINERS_LOSERS",
            json!({
                "metadata": "Top gainers, losers, and most actively traded US tickers",
                "top_gainers": tickers("G", 25),
                "top_losers": tickers("L", 5),
                "most_actively_traded": tickers("A", 3),
            }),
        ),
        (
            "OVERVIEW",
            json!({ "Symbol": "AAPL", "Name": "Apple Inc", "Beta": "1.24", "52WeekHigh": "199.62" }),
        ),
        (
            "INCOME_STATEMENT",
            json!({
                "symbol": "AAPL",
                "annualReports": [{ "fiscalDateEnding": "2023-09-30" }],
                "quarterlyReports": [
                    { "fiscalDateEnding": "2024-03-31", "totalRevenue": "90753000000" },
                    { "fiscalDateEnding": "2023-12-31", "totalRevenue": "119575000000" }
                ]
            }),
        ),
        (
            "NEWS_SENTIMENT",
            json!({
                "items": "3",
                "feed": [
                    { "title": "Apple rallies", "overall_sentiment_score": 0.42 },
                    { "title": "Analysts upgrade", "overall_sentiment_score": 0.18 },
                    { "title": "Unscored wire item" }
                ]
            }),
        ),
        (
            "/quote",
            json!({ "c": 189.84, "d": 1.2, "dp": 0.64, "h": 190.1, "l": 187.3, "o": 188.0, "pc": 188.64, "t": 1717200000, "v": 52345678 }),
        ),
        (
            "/stock/recommendation",
            json!([
                { "period": "2024-06-01", "strongBuy": 12, "buy": 24, "hold": 7, "sell": 1, "strongSell": 0 },
                { "period": "2024-05-01", "strongBuy": 11, "buy": 23, "hold": 8, "sell": 1, "strongSell": 0 }
            ]),
        ),
        (
            "/stock/candle",
            json!({
                "s": "ok",
                "t": [1717027200, 1717113600],
                "o": [190.0, 191.2],
                "h": [192.5, 192.0],
                "l": [189.1, 190.4],
                "c": [191.3, 191.9],
                "v": [41000000, 38000000]
            }),
        ),
    ]
}

pub fn default_body(key: &str) -> Value {
    default_bodies()
        .into_iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v)
        .unwrap()
}

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&body).unwrap();
    (status, value)
}

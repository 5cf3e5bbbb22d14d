use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use anyhow::Context;

pub const DEFAULT_PORT: u16 = 3000;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub cors_allow: Vec<String>,
    pub alpha_vantage_api_key: Option<String>,
    pub finnhub_api_key: Option<String>,
    pub alpha_vantage_base_url: Option<String>,
    pub finnhub_base_url: Option<String>,
}

impl Config {
    /// Read configuration from the process environment, after loading `.env`.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let port = match non_empty("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("Invalid PORT: {}", raw))?,
            None => DEFAULT_PORT,
        };
        let listen_addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), port);

        let cors_allow = non_empty("CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            listen_addr,
            cors_allow,
            alpha_vantage_api_key: non_empty("ALPHA_VANTAGE_API_KEY"),
            finnhub_api_key: non_empty("FINNHUB_API_KEY"),
            alpha_vantage_base_url: non_empty("ALPHA_VANTAGE_BASE_URL"),
            finnhub_base_url: non_empty("FINNHUB_BASE_URL"),
        })
    }
}

//! Lanza market data crate
//!
//! Upstream access for the Lanza Bulls aggregator.
//!
//! # Overview
//!
//! - [`provider`] - Alpha Vantage and Finnhub clients, one method per upstream resource
//! - [`gather`] - all-or-nothing concurrent fetches across both providers
//! - [`normalize`] - total functions that reduce upstream documents to the shapes clients use
//! - [`signals`] - derived values (average news sentiment, unusual volume)
//! - [`errors`] - the [`MarketDataError`] type
//!
//! ```text
//! provider (transport) --> UpstreamResponse --json()--> Value --> normalize / signals
//! ```

pub mod errors;
pub mod gather;
pub mod normalize;
pub mod provider;
pub mod signals;

pub use errors::MarketDataError;
pub use gather::{fetch_market_snapshot, fetch_stock_documents, RawStockDocuments};
pub use provider::alpha_vantage::AlphaVantageProvider;
pub use provider::finnhub::{CandleWindow, FinnhubProvider};
pub use provider::UpstreamResponse;

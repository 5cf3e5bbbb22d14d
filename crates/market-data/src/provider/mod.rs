//! Upstream provider clients.
//!
//! Each provider exposes one method per upstream resource. A method resolves
//! once the transport response has arrived and its status has been checked;
//! the body is parsed separately through [`UpstreamResponse::json`].

mod response;

pub mod alpha_vantage;
pub mod finnhub;

pub use response::UpstreamResponse;

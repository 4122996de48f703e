//! Yahoo Finance Market Data Adapter
//!
//! Implementation of `MarketDataProvider` over the Yahoo Finance query API:
//! - Quote metadata from `v7/finance/quote`
//! - Expirations and chains from `v7/finance/options/{symbol}`
//! - Lazy session cookie and crumb, refreshed after an auth rejection

mod adapter;
mod api_types;
mod error;
mod http_client;

pub use adapter::YahooMarketDataAdapter;
pub use error::YahooError;

//! Port Interfaces
//!
//! Defines the interfaces (ports) for external systems following
//! the Hexagonal Architecture pattern. These are the contracts that
//! infrastructure adapters must implement.
//!
//! ## Driven Ports (Outbound)
//!
//! - `MarketDataProvider`: Quotes, option expirations and option chains
//! - `Clock`: Server local time

mod clock_port;
mod market_data_port;

#[cfg(test)]
pub use market_data_port::MockMarketDataProvider;
pub use clock_port::{Clock, FixedClock, SystemClock};
pub use market_data_port::{MarketDataProvider, ProviderError};

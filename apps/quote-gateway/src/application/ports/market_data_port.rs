//! Market Data Port (Driven Port)
//!
//! Interface for fetching quotes, option expirations and option chains from
//! the external market data provider.

use async_trait::async_trait;

use crate::domain::options::OptionChainRows;
use crate::domain::quote::QuoteInfo;
use crate::domain::symbol::Symbol;

/// Market data provider error.
///
/// These are distinguished for logging only; clients see a single error shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// The provider has no data for the symbol.
    #[error("No data found, symbol may be delisted: {symbol}")]
    SymbolNotFound {
        /// The unknown symbol.
        symbol: String,
    },

    /// The requested expiration is malformed or not listed.
    #[error("{message}")]
    InvalidExpiration {
        /// Error details.
        message: String,
    },

    /// The provider throttled the request.
    #[error("Too Many Requests. Rate limited. Try after a while.")]
    RateLimited,

    /// The provider rejected the session.
    #[error("Provider authentication failed: {message}")]
    Unauthorized {
        /// Error details.
        message: String,
    },

    /// Connection, TLS or timeout failure.
    #[error("Provider connection error: {message}")]
    Network {
        /// Error details.
        message: String,
    },

    /// The provider returned a non-success status.
    #[error("Provider API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error details.
        message: String,
    },

    /// The provider response could not be decoded.
    #[error("Invalid provider response: {message}")]
    InvalidResponse {
        /// Error details.
        message: String,
    },
}

/// Port for fetching market data from the external provider.
///
/// This is a driven (secondary/outbound) port. The infrastructure layer
/// provides the Yahoo Finance implementation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Get quote metadata for a symbol.
    async fn quote_info(&self, symbol: &Symbol) -> Result<QuoteInfo, ProviderError>;

    /// Get the available option expirations (`YYYY-MM-DD`), ascending.
    async fn expirations(&self, symbol: &Symbol) -> Result<Vec<String>, ProviderError>;

    /// Get calls and puts for one expiration (`YYYY-MM-DD`).
    async fn option_chain(
        &self,
        symbol: &Symbol,
        expiration: &str,
    ) -> Result<OptionChainRows, ProviderError>;
}

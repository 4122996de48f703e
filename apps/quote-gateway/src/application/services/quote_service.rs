//! Quote Service
//!
//! Implements the gateway's four read-only operations on top of the
//! `MarketDataProvider` port. Each call is a stateless fetch, transform and
//! respond cycle; provider failures are logged and collapsed into
//! `GatewayError` here, once.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::application::error::GatewayError;
use crate::application::ports::{Clock, MarketDataProvider, ProviderError, SystemClock};
use crate::domain::options::{
    ExpirationList, OptionChain, OptionContract, OptionType, days_to_expiry, parse_expiration,
};
use crate::domain::quote::Quote;
use crate::domain::symbol::Symbol;

/// Fixed status token reported by the health check.
pub const HEALTH_STATUS_OK: &str = "ok";

/// Health check response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    /// Always `"ok"`.
    pub status: String,
    /// Server local time.
    pub timestamp: String,
}

/// Application service behind the HTTP endpoints.
pub struct QuoteService<P, C = SystemClock>
where
    P: MarketDataProvider + ?Sized,
    C: Clock,
{
    provider: Arc<P>,
    clock: C,
}

impl<P> QuoteService<P, SystemClock>
where
    P: MarketDataProvider + ?Sized,
{
    /// Create a service using the system clock.
    #[must_use]
    pub const fn new(provider: Arc<P>) -> Self {
        Self {
            provider,
            clock: SystemClock,
        }
    }
}

impl<P, C> QuoteService<P, C>
where
    P: MarketDataProvider + ?Sized,
    C: Clock,
{
    /// Create a service with an explicit clock.
    #[must_use]
    pub const fn with_clock(provider: Arc<P>, clock: C) -> Self {
        Self { provider, clock }
    }

    /// Report liveness. Never touches the provider.
    #[must_use]
    pub fn health(&self) -> HealthReport {
        HealthReport {
            status: HEALTH_STATUS_OK.to_string(),
            timestamp: self.clock.timestamp(),
        }
    }

    /// Quote for a symbol.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` for an empty symbol or any provider failure.
    #[tracing::instrument(skip(self), fields(symbol = %raw_symbol))]
    pub async fn get_stock(&self, raw_symbol: &str) -> Result<Quote, GatewayError> {
        let symbol = normalize(raw_symbol)?;

        let info = self
            .provider
            .quote_info(&symbol)
            .await
            .map_err(|e| collapse("quote", &e, raw_symbol))?;

        Ok(Quote::from_info(&symbol, &info, self.clock.timestamp()))
    }

    /// Option expirations for a symbol, in provider order.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` for an empty symbol or any provider failure.
    #[tracing::instrument(skip(self), fields(symbol = %raw_symbol))]
    pub async fn get_expirations(&self, raw_symbol: &str) -> Result<ExpirationList, GatewayError> {
        let symbol = normalize(raw_symbol)?;

        let expirations = self
            .provider
            .expirations(&symbol)
            .await
            .map_err(|e| collapse("expirations", &e, raw_symbol))?;

        Ok(ExpirationList::new(&symbol, expirations))
    }

    /// Option chain for a symbol and expiration.
    ///
    /// Without an expiration the nearest listed one is used.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` for an empty symbol, a malformed or unlisted
    /// expiration, a symbol with no options, or any provider failure.
    #[tracing::instrument(skip(self), fields(symbol = %raw_symbol))]
    pub async fn get_option_chain(
        &self,
        raw_symbol: &str,
        expiration: Option<&str>,
    ) -> Result<OptionChain, GatewayError> {
        let symbol = normalize(raw_symbol)?;

        let info = self
            .provider
            .quote_info(&symbol)
            .await
            .map_err(|e| collapse("quote", &e, raw_symbol))?;
        let underlying_price = info.resolved_price();

        let expiration = match expiration.map(str::trim).filter(|e| !e.is_empty()) {
            Some(requested) => requested.to_string(),
            None => self.nearest_expiration(&symbol, raw_symbol).await?,
        };

        let expiration_date = parse_expiration(&expiration)
            .map_err(|e| GatewayError::new(e.to_string(), raw_symbol))?;

        let rows = self
            .provider
            .option_chain(&symbol, &expiration)
            .await
            .map_err(|e| collapse("option_chain", &e, raw_symbol))?;

        let now = self.clock.now();
        let calls = OptionContract::from_rows(&rows.calls, OptionType::Call);
        let puts = OptionContract::from_rows(&rows.puts, OptionType::Put);

        tracing::debug!(
            expiration = %expiration,
            calls = calls.len(),
            puts = puts.len(),
            "Option chain resolved"
        );

        Ok(OptionChain {
            symbol: symbol.into_inner(),
            expiration,
            days_to_expiry: days_to_expiry(expiration_date, now),
            underlying_price,
            calls,
            puts,
            timestamp: self.clock.timestamp(),
        })
    }

    async fn nearest_expiration(
        &self,
        symbol: &Symbol,
        raw_symbol: &str,
    ) -> Result<String, GatewayError> {
        let expirations = self
            .provider
            .expirations(symbol)
            .await
            .map_err(|e| collapse("expirations", &e, raw_symbol))?;

        expirations
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::no_options(raw_symbol))
    }
}

fn normalize(raw_symbol: &str) -> Result<Symbol, GatewayError> {
    let symbol = Symbol::new(raw_symbol);
    if symbol.is_empty() {
        return Err(GatewayError::new("Symbol must not be empty", raw_symbol));
    }
    Ok(symbol)
}

fn collapse(operation: &'static str, error: &ProviderError, raw_symbol: &str) -> GatewayError {
    tracing::warn!(operation, error = ?error, "Provider request failed");
    GatewayError::from_provider(error, raw_symbol)
}

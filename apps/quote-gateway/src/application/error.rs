//! Gateway Error
//!
//! The single client-facing error. Every failure of a data endpoint (bad
//! symbol, malformed expiration, provider outage, throttling, empty option
//! list) collapses into this shape and is reported as HTTP 400.

use serde::{Deserialize, Serialize};

use crate::application::ports::ProviderError;

/// Message returned when a symbol has no listed expirations.
pub const NO_OPTIONS_MESSAGE: &str = "No options available for this symbol";

/// Upstream or input error, serialized as `{error, symbol}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{error}")]
pub struct GatewayError {
    /// Human-readable message.
    pub error: String,
    /// Symbol exactly as the client requested it.
    pub symbol: String,
}

impl GatewayError {
    /// Create an error for the requested symbol.
    #[must_use]
    pub fn new(message: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            symbol: symbol.into(),
        }
    }

    /// No option expirations are listed for the symbol.
    #[must_use]
    pub fn no_options(symbol: impl Into<String>) -> Self {
        Self::new(NO_OPTIONS_MESSAGE, symbol)
    }

    /// Collapse a provider failure.
    #[must_use]
    pub fn from_provider(error: &ProviderError, symbol: impl Into<String>) -> Self {
        Self::new(error.to_string(), symbol)
    }
}

//! Yahoo-specific error types.

use thiserror::Error;

use crate::application::ports::ProviderError;

/// Errors from the Yahoo Finance adapter.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum YahooError {
    /// Client construction failed.
    #[error("HTTP client error: {0}")]
    Client(String),

    /// Connection, TLS or timeout failure.
    #[error("Network error: {0}")]
    Network(String),

    /// Session cookie or crumb rejected or unavailable.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Resource not found (unknown symbol).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited.
    #[error("Rate limited")]
    RateLimited,

    /// API returned an error status.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the API.
        message: String,
    },

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(String),

    /// Expiration malformed or not listed for the symbol.
    #[error("{0}")]
    InvalidExpiration(String),
}

impl YahooError {
    /// Map onto the port's error, attributing not-found to `symbol`.
    #[must_use]
    pub fn into_provider_error(self, symbol: &str) -> ProviderError {
        match self {
            Self::NotFound(_) => ProviderError::SymbolNotFound {
                symbol: symbol.to_string(),
            },
            Self::RateLimited => ProviderError::RateLimited,
            Self::Unauthorized(message) => ProviderError::Unauthorized { message },
            Self::Client(message) | Self::Network(message) => ProviderError::Network { message },
            Self::Api { status, message } => ProviderError::Api { status, message },
            Self::JsonParse(message) => ProviderError::InvalidResponse { message },
            Self::InvalidExpiration(message) => ProviderError::InvalidExpiration { message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_attributes_symbol() {
        let err = YahooError::NotFound("No data".to_string()).into_provider_error("ZZZZ");
        assert_eq!(
            err,
            ProviderError::SymbolNotFound {
                symbol: "ZZZZ".to_string()
            }
        );
    }

    #[test]
    fn network_errors_map_to_network() {
        let err = YahooError::Network("timed out".to_string()).into_provider_error("AAPL");
        assert!(matches!(err, ProviderError::Network { .. }));
    }

    #[test]
    fn rate_limited_maps() {
        let err = YahooError::RateLimited.into_provider_error("AAPL");
        assert_eq!(err, ProviderError::RateLimited);
    }

    #[test]
    fn invalid_expiration_keeps_message() {
        let err = YahooError::InvalidExpiration("Expiration `2024-01-09` cannot be found.".into())
            .into_provider_error("AAPL");
        assert_eq!(err.to_string(), "Expiration `2024-01-09` cannot be found.");
    }
}

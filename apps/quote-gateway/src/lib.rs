#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::default_trait_access,
        clippy::items_after_statements
    )
)]

//! Quote Gateway - Market Data HTTP Proxy
//!
//! A small JSON API over a public market-data provider: stock quotes,
//! option expirations and option chains, normalized into a stable shape for
//! a browser frontend.
//!
//! # Layers (inside → outside)
//!
//! - **Domain**: Value types and pure pricing rules
//!   - `symbol`: Uppercased ticker newtype
//!   - `quote`: Price fallback, change and rounding
//!   - `options`: Contract normalization and days-to-expiry
//!
//! - **Application**: Use cases and port definitions
//!   - `ports`: `MarketDataProvider` and `Clock`
//!   - `services`: `QuoteService` (health, stock, expirations, chain)
//!   - `error`: `GatewayError`, the one client-facing error
//!
//! - **Infrastructure**: Adapters and external integrations
//!   - `yahoo`: Yahoo Finance HTTP adapter
//!   - `http`: Axum router and server
//!   - `config`, `telemetry`, `metrics`
//!
//! # Data Flow
//!
//! ```text
//! Browser ──► axum router ──► QuoteService ──► MarketDataProvider ──► Yahoo Finance
//!                 ▲                 │
//!                 └── JSON / 400 ◄──┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Module Declarations
// =============================================================================

/// Domain layer - Value types and pricing rules with no I/O.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Re-exports
// =============================================================================

// Domain types
pub use domain::options::{ExpirationList, OptionChain, OptionContract, OptionType};
pub use domain::quote::{Quote, QuoteInfo};
pub use domain::symbol::Symbol;

// Application
pub use application::error::GatewayError;
pub use application::ports::{Clock, FixedClock, MarketDataProvider, ProviderError, SystemClock};
pub use application::services::{HealthReport, QuoteService};

// Infrastructure config
pub use infrastructure::config::{ConfigError, GatewayConfig, ProviderSettings, ServerSettings};

// HTTP
pub use infrastructure::http::{AppState, GatewayServer, GatewayService, create_router};

// Provider
pub use infrastructure::yahoo::{YahooError, YahooMarketDataAdapter};

// Metrics
pub use infrastructure::metrics::init_metrics;

// Telemetry
pub use infrastructure::telemetry::{TelemetryConfig, TelemetryGuard, init as init_telemetry};

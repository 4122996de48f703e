//! Quote Gateway Binary
//!
//! Starts the market data HTTP gateway.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin quote-gateway
//! ```
//!
//! # Environment Variables
//!
//! - `PORT`: HTTP listen port (default: 5000)
//! - `STATIC_DIR`: Frontend directory (default: static)
//! - `CORS_ALLOW_ANY`: Permissive CORS (default: true)
//! - `YAHOO_QUERY_URL`: Provider query API (default: <https://query2.finance.yahoo.com>)
//! - `YAHOO_COOKIE_URL`: Session cookie URL (default: <https://fc.yahoo.com>)
//! - `YAHOO_AUTH_ENABLED`: Fetch cookie and crumb (default: true)
//! - `YAHOO_TIMEOUT_SECS`: Provider request timeout (default: 10)
//! - `YAHOO_USER_AGENT`: Provider User-Agent
//! - `OTEL_ENABLED`: Export spans over OTLP (default: false)
//! - `OTEL_EXPORTER_OTLP_ENDPOINT`: OTLP endpoint (default: <http://localhost:4317>)
//! - `OTEL_SERVICE_NAME`: Service name (default: quote-gateway)
//! - `RUST_LOG`: Log level (default: info)

use std::sync::Arc;

use anyhow::Context;
use quote_gateway::{
    AppState, Clock, GatewayConfig, GatewayServer, MarketDataProvider, QuoteService, SystemClock,
    YahooMarketDataAdapter, init_metrics, init_telemetry,
};
use tokio::signal;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();

    let _telemetry_guard = init_telemetry().context("failed to initialize telemetry")?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting quote gateway");

    let _metrics_handle = init_metrics().context("failed to install metrics recorder")?;

    let config = GatewayConfig::from_env()?;
    log_config(&config);

    let provider: Arc<dyn MarketDataProvider> = Arc::new(
        YahooMarketDataAdapter::new(&config.provider)
            .context("failed to build market data client")?,
    );
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let state = AppState::new(QuoteService::with_clock(provider, clock));

    let shutdown_token = CancellationToken::new();
    tokio::spawn(await_shutdown(shutdown_token.clone()));

    GatewayServer::new(config.server, state, shutdown_token)
        .run()
        .await?;

    tracing::info!("Quote gateway stopped");
    Ok(())
}

/// Log the parsed configuration.
fn log_config(config: &GatewayConfig) {
    tracing::info!(
        port = config.server.port,
        static_dir = %config.server.static_dir.display(),
        cors_allow_any = config.server.cors_allow_any,
        "Configuration loaded"
    );
    tracing::debug!(
        query_url = %config.provider.query_url,
        auth_enabled = config.provider.auth_enabled,
        timeout_secs = config.provider.timeout.as_secs(),
        "Provider settings"
    );
}

/// Load .env file from current directory or any ancestor directory.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}

/// Wait for shutdown signal (SIGTERM or SIGINT), then cancel the token.
async fn await_shutdown(shutdown_token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating shutdown");
        }
    }

    shutdown_token.cancel();
}

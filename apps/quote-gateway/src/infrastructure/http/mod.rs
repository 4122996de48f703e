//! HTTP API
//!
//! Axum router for the gateway.
//!
//! # Endpoints
//!
//! - `GET /api/health` - Liveness with server timestamp
//! - `GET /api/stock/{symbol}` - Quote
//! - `GET /api/options/{symbol}/expirations` - Listed expirations
//! - `GET /api/options/{symbol}/chain?expiration=YYYY-MM-DD` - Option chain
//! - `GET /metrics` - Prometheus metrics in text format
//! - `GET /` - Static frontend; other unmatched paths fall back to the static dir

mod error;
mod handlers;
mod server;

use std::sync::Arc;

use axum::{Router, body::Body, http::Request, routing::get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::application::ports::{Clock, MarketDataProvider};
use crate::application::services::QuoteService;
use crate::infrastructure::config::ServerSettings;

pub use error::ApiError;
pub use handlers::ChainParams;
pub use server::{GatewayServer, ServerError};

/// Service type behind the router: any provider, any clock.
pub type GatewayService = QuoteService<dyn MarketDataProvider, Arc<dyn Clock>>;

/// Shared state for the HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    service: Arc<GatewayService>,
}

impl AppState {
    /// Wrap a service for sharing across requests.
    #[must_use]
    pub fn new(service: GatewayService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// Create the Axum router with all endpoints.
#[must_use]
pub fn create_router(state: AppState, settings: &ServerSettings) -> Router {
    let index = ServeFile::new(settings.static_dir.join("index.html"));
    let static_files = ServeDir::new(&settings.static_dir);

    let router = Router::new()
        .nest("/api", api_routes())
        .route("/metrics", get(handlers::metrics))
        .route_service("/", index)
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = %Uuid::new_v4(),
            )
        }))
        .with_state(state);

    if settings.cors_allow_any {
        router.layer(cors_layer())
    } else {
        router
    }
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/stock/{symbol}", get(handlers::stock))
        .route(
            "/options/{symbol}/expirations",
            get(handlers::expirations),
        )
        .route("/options/{symbol}/chain", get(handlers::option_chain))
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

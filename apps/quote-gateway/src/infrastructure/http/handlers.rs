//! Route handlers.

use axum::{
    Json,
    extract::{FromRequestParts, Path, Query, State},
    http::{StatusCode, request::Parts},
    response::IntoResponse,
};

use crate::application::error::GatewayError;
use crate::application::services::HealthReport;
use crate::domain::options::{ExpirationList, OptionChain};
use crate::domain::quote::Quote;
use crate::infrastructure::metrics::{Endpoint, get_metrics_handle, record_request};

use super::AppState;
use super::error::ApiError;

/// `{symbol}` path segment, rejected as an `ApiError`.
#[derive(Debug)]
pub(super) struct SymbolPath(String);

impl<S> FromRequestParts<S> for SymbolPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Path::<String>::from_request_parts(parts, state)
            .await
            .map(|Path(symbol)| Self(symbol))
            .map_err(|rejection| rejected(parts, &rejection.body_text()))
    }
}

/// Query parameters of the chain endpoint.
///
/// A repeated `expiration` keeps its first value.
#[derive(Debug, Default)]
pub struct ChainParams {
    /// Optional `YYYY-MM-DD` expiration.
    pub expiration: Option<String>,
}

impl ChainParams {
    fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        Self {
            expiration: pairs
                .into_iter()
                .find_map(|(key, value)| (key == "expiration").then_some(value)),
        }
    }
}

impl<S> FromRequestParts<S> for ChainParams
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
            .map(|Query(pairs)| Self::from_pairs(pairs))
            .map_err(|rejection| rejected(parts, &rejection.body_text()))
    }
}

fn rejected(parts: &Parts, message: &str) -> ApiError {
    ApiError::from(GatewayError::new(message, raw_symbol(parts.uri.path())))
}

/// Undecoded segment following `stock` or `options` in the request path.
fn raw_symbol(path: &str) -> &str {
    let mut segments = path.split('/');
    segments
        .by_ref()
        .find(|segment| matches!(*segment, "stock" | "options"));
    segments.next().unwrap_or_default()
}

pub(super) async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    record_request(Endpoint::Health, true);
    Json(state.service.health())
}

pub(super) async fn stock(
    State(state): State<AppState>,
    SymbolPath(symbol): SymbolPath,
) -> Result<Json<Quote>, ApiError> {
    respond(Endpoint::Stock, state.service.get_stock(&symbol).await)
}

pub(super) async fn expirations(
    State(state): State<AppState>,
    SymbolPath(symbol): SymbolPath,
) -> Result<Json<ExpirationList>, ApiError> {
    respond(
        Endpoint::Expirations,
        state.service.get_expirations(&symbol).await,
    )
}

pub(super) async fn option_chain(
    State(state): State<AppState>,
    SymbolPath(symbol): SymbolPath,
    params: ChainParams,
) -> Result<Json<OptionChain>, ApiError> {
    respond(
        Endpoint::OptionChain,
        state
            .service
            .get_option_chain(&symbol, params.expiration.as_deref())
            .await,
    )
}

pub(super) async fn metrics() -> impl IntoResponse {
    get_metrics_handle().map_or_else(
        || {
            (
                StatusCode::SERVICE_UNAVAILABLE,
                [("content-type", "text/plain")],
                "Metrics not initialized".to_string(),
            )
        },
        |handle| {
            (
                StatusCode::OK,
                [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
                handle.render(),
            )
        },
    )
}

fn respond<T>(endpoint: Endpoint, result: Result<T, GatewayError>) -> Result<Json<T>, ApiError> {
    record_request(endpoint, result.is_ok());
    result.map(Json).map_err(ApiError::from)
}

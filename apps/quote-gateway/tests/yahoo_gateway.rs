//! Yahoo Gateway Integration Tests
//!
//! Full stack: router, service and Yahoo adapter against a fake upstream.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use quote_gateway::{
    AppState, Clock, MarketDataProvider, ProviderSettings, QuoteService, ServerSettings,
    SystemClock, YahooMarketDataAdapter, create_router,
};
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// 2030-01-18 and 2030-02-15 at 00:00 UTC
const JAN_18: i64 = 1_894_924_800;
const FEB_15: i64 = 1_897_344_000;

fn gateway(server: &MockServer) -> Router {
    let settings = ProviderSettings {
        query_url: server.uri(),
        cookie_url: format!("{}/cookie", server.uri()),
        auth_enabled: false,
        timeout: Duration::from_secs(5),
        user_agent: "quote-gateway-test".to_string(),
    };
    let provider: Arc<dyn MarketDataProvider> =
        Arc::new(YahooMarketDataAdapter::new(&settings).unwrap());
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    create_router(
        AppState::new(QuoteService::with_clock(provider, clock)),
        &ServerSettings::default(),
    )
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn mount_quote(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v7/finance/quote"))
        .and(query_param("symbols", "SPY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "quoteResponse": {
                "result": [{
                    "symbol": "SPY",
                    "shortName": "SPDR S&P 500",
                    "regularMarketPrice": 472.65,
                    "regularMarketPreviousClose": 467.28,
                    "regularMarketVolume": 84_000_000,
                    "fiftyTwoWeekHigh": 479.98,
                    "fiftyTwoWeekLow": 374.77
                }],
                "error": null
            }
        })))
        .mount(server)
        .await;
}

async fn mount_listing(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v7/finance/options/SPY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "optionChain": {
                "result": [{
                    "underlyingSymbol": "SPY",
                    "expirationDates": [JAN_18, FEB_15],
                    "options": [{"expirationDate": JAN_18, "calls": [], "puts": []}]
                }],
                "error": null
            }
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn stock_through_provider() {
    let server = MockServer::start().await;
    mount_quote(&server).await;

    let (status, body) = get(gateway(&server), "/api/stock/spy").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["symbol"], "SPY");
    assert_eq!(body["name"], "SPDR S&P 500");
    assert_eq!(body["currentPrice"], 472.65);
    assert_eq!(body["change"], 5.37);
    assert_eq!(body["changePercent"], 1.15);
    assert_eq!(body["volume"], 84_000_000);
    assert_eq!(body["marketCap"], 0);
}

#[tokio::test]
async fn expirations_through_provider() {
    let server = MockServer::start().await;
    mount_listing(&server).await;

    let (status, body) = get(gateway(&server), "/api/options/spy/expirations").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["expirations"], json!(["2030-01-18", "2030-02-15"]));
    assert_eq!(body["count"], 2);
}

#[tokio::test]
async fn chain_through_provider() {
    let server = MockServer::start().await;
    mount_quote(&server).await;
    Mock::given(method("GET"))
        .and(path("/v7/finance/options/SPY"))
        .and(query_param("date", FEB_15.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "optionChain": {
                "result": [{
                    "expirationDates": [JAN_18, FEB_15],
                    "options": [{
                        "expirationDate": FEB_15,
                        "calls": [{
                            "contractSymbol": "SPY300215C00470000",
                            "strike": 470.0,
                            "lastPrice": 31.2,
                            "bid": 30.9,
                            "ask": 31.5,
                            "volume": 14,
                            "openInterest": 880,
                            "impliedVolatility": 0.1821,
                            "inTheMoney": true
                        }],
                        "puts": []
                    }]
                }],
                "error": null
            }
        })))
        .mount(&server)
        .await;
    mount_listing(&server).await;

    let (status, body) = get(
        gateway(&server),
        "/api/options/spy/chain?expiration=2030-02-15",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["expiration"], "2030-02-15");
    assert_eq!(body["underlyingPrice"], 472.65);
    assert!(body["daysToExpiry"].as_i64().unwrap() > 0);
    assert_eq!(body["calls"][0]["openInterest"], 880);
    assert_eq!(body["calls"][0]["type"], "call");
    assert_eq!(body["puts"], json!([]));
}

#[tokio::test]
async fn unlisted_expiration_reports_available() {
    let server = MockServer::start().await;
    mount_quote(&server).await;
    mount_listing(&server).await;

    let (status, body) = get(
        gateway(&server),
        "/api/options/spy/chain?expiration=2030-01-19",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["symbol"], "spy");
    assert_eq!(
        body["error"],
        "Expiration `2030-01-19` cannot be found. Available expirations are: \
         ['2030-01-18', '2030-02-15']"
    );
}

#[tokio::test]
async fn upstream_server_error_is_bad_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&server)
        .await;

    let (status, body) = get(gateway(&server), "/api/stock/spy").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["symbol"], "spy");
}

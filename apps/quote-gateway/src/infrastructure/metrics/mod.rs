//! Prometheus Metrics Module
//!
//! Exposes gateway metrics in Prometheus text format.
//!
//! # Metrics
//!
//! - **Requests**: API requests by endpoint and outcome
//! - **Upstream**: provider call latency and failures by operation
//!
//! Metrics are rendered at `/metrics` on the API port.

use std::sync::OnceLock;
use std::time::Duration;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

// =============================================================================
// Global Metrics Handle
// =============================================================================

static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder and register metric descriptions.
///
/// Calling this again after a successful install returns the existing handle.
///
/// # Errors
///
/// Returns an error if another global recorder is already installed.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    if let Some(handle) = PROMETHEUS_HANDLE.get() {
        return Ok(handle.clone());
    }

    let handle = PrometheusBuilder::new().install_recorder()?;
    register_metrics();
    Ok(PROMETHEUS_HANDLE.get_or_init(|| handle).clone())
}

/// Get the Prometheus handle for rendering metrics.
///
/// Returns `None` if metrics have not been initialized.
#[must_use]
pub fn get_metrics_handle() -> Option<PrometheusHandle> {
    PROMETHEUS_HANDLE.get().cloned()
}

// =============================================================================
// Metric Registration
// =============================================================================

fn register_metrics() {
    describe_counter!(
        "quote_gateway_requests_total",
        "Total API requests by endpoint and outcome"
    );
    describe_counter!(
        "quote_gateway_upstream_errors_total",
        "Total failed provider calls by operation"
    );
    describe_histogram!(
        "quote_gateway_upstream_latency_seconds",
        "Provider call latency by operation"
    );
}

// =============================================================================
// Metric Recording Functions
// =============================================================================

/// API endpoint label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `/api/health`
    Health,
    /// `/api/stock/{symbol}`
    Stock,
    /// `/api/options/{symbol}/expirations`
    Expirations,
    /// `/api/options/{symbol}/chain`
    OptionChain,
}

impl Endpoint {
    /// Label value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Health => "health",
            Self::Stock => "stock",
            Self::Expirations => "expirations",
            Self::OptionChain => "option_chain",
        }
    }
}

/// Provider operation label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamOperation {
    /// Quote metadata lookup.
    Quote,
    /// Expiration listing.
    Expirations,
    /// Option chain fetch.
    OptionChain,
}

impl UpstreamOperation {
    /// Label value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Quote => "quote",
            Self::Expirations => "expirations",
            Self::OptionChain => "option_chain",
        }
    }
}

const fn outcome(success: bool) -> &'static str {
    if success { "success" } else { "error" }
}

/// Record a handled API request.
pub fn record_request(endpoint: Endpoint, success: bool) {
    counter!(
        "quote_gateway_requests_total",
        "endpoint" => endpoint.as_str(),
        "outcome" => outcome(success)
    )
    .increment(1);
}

/// Record one provider call.
pub fn record_upstream(operation: UpstreamOperation, elapsed: Duration, success: bool) {
    histogram!(
        "quote_gateway_upstream_latency_seconds",
        "operation" => operation.as_str()
    )
    .record(elapsed.as_secs_f64());

    if !success {
        counter!(
            "quote_gateway_upstream_errors_total",
            "operation" => operation.as_str()
        )
        .increment(1);
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_as_str() {
        assert_eq!(Endpoint::Health.as_str(), "health");
        assert_eq!(Endpoint::Stock.as_str(), "stock");
        assert_eq!(Endpoint::Expirations.as_str(), "expirations");
        assert_eq!(Endpoint::OptionChain.as_str(), "option_chain");
    }

    #[test]
    fn upstream_operation_as_str() {
        assert_eq!(UpstreamOperation::Quote.as_str(), "quote");
        assert_eq!(UpstreamOperation::Expirations.as_str(), "expirations");
        assert_eq!(UpstreamOperation::OptionChain.as_str(), "option_chain");
    }

    #[test]
    fn outcome_labels() {
        assert_eq!(outcome(true), "success");
        assert_eq!(outcome(false), "error");
    }

    #[test]
    fn recording_without_recorder_is_noop() {
        record_request(Endpoint::Stock, false);
        record_upstream(UpstreamOperation::Quote, Duration::from_millis(5), true);
    }
}

//! Yahoo Finance API response types.
//!
//! Only the fields the gateway reads are modeled; everything else in the
//! payloads is ignored.

use serde::Deserialize;

use crate::domain::options::{OptionChainRows, OptionRow};
use crate::domain::quote::QuoteInfo;

// =============================================================================
// Error Envelope
// =============================================================================

/// Error envelope returned on non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct YahooErrorResponse {
    /// Wrapper object.
    pub finance: Option<YahooFinanceError>,
}

/// Inner error wrapper.
#[derive(Debug, Deserialize)]
pub struct YahooFinanceError {
    /// Error details.
    pub error: Option<YahooErrorDetail>,
}

/// Error code and description.
#[derive(Debug, Deserialize)]
pub struct YahooErrorDetail {
    /// Error code, e.g. "Not Found".
    pub code: Option<String>,
    /// Human-readable description.
    pub description: Option<String>,
}

impl YahooErrorResponse {
    /// Best human-readable message in the envelope.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        let detail = self.finance.as_ref()?.error.as_ref()?;
        detail
            .description
            .clone()
            .filter(|d| !d.is_empty())
            .or_else(|| detail.code.clone())
    }
}

// =============================================================================
// Quote (v7/finance/quote)
// =============================================================================

/// `GET /v7/finance/quote` response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    /// Result wrapper.
    pub quote_response: QuoteResult,
}

/// Quote result list.
#[derive(Debug, Deserialize)]
pub struct QuoteResult {
    /// One entry per requested symbol that the provider recognized.
    #[serde(default)]
    pub result: Vec<QuoteData>,
}

/// Quote metadata for one symbol.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteData {
    /// Live price (present on some payload variants).
    pub current_price: Option<f64>,
    /// Regular-session price.
    pub regular_market_price: Option<f64>,
    /// Previous close.
    #[serde(alias = "previousClose")]
    pub regular_market_previous_close: Option<f64>,
    /// Short name.
    pub short_name: Option<String>,
    /// Long name.
    pub long_name: Option<String>,
    /// Session volume.
    #[serde(alias = "volume")]
    pub regular_market_volume: Option<f64>,
    /// Market capitalization.
    pub market_cap: Option<f64>,
    /// 52-week high.
    pub fifty_two_week_high: Option<f64>,
    /// 52-week low.
    pub fifty_two_week_low: Option<f64>,
}

impl From<QuoteData> for QuoteInfo {
    fn from(data: QuoteData) -> Self {
        Self {
            current_price: data.current_price,
            regular_market_price: data.regular_market_price,
            previous_close: data.regular_market_previous_close,
            short_name: data.short_name,
            long_name: data.long_name,
            volume: data.regular_market_volume.and_then(to_count),
            market_cap: data.market_cap.and_then(to_count),
            fifty_two_week_high: data.fifty_two_week_high,
            fifty_two_week_low: data.fifty_two_week_low,
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_count(value: f64) -> Option<u64> {
    (value.is_finite() && value >= 0.0).then(|| value.trunc() as u64)
}

// =============================================================================
// Options (v7/finance/options/{symbol})
// =============================================================================

/// `GET /v7/finance/options/{symbol}` response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsResponse {
    /// Result wrapper.
    pub option_chain: OptionsResult,
}

/// Options result list.
#[derive(Debug, Deserialize)]
pub struct OptionsResult {
    /// Empty when the symbol is unknown.
    #[serde(default)]
    pub result: Vec<OptionsData>,
}

/// Options data for one underlying.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsData {
    /// Listed expirations as unix seconds (UTC midnight), ascending.
    #[serde(default)]
    pub expiration_dates: Vec<i64>,
    /// One entry for the requested (or nearest) expiration.
    #[serde(default)]
    pub options: Vec<OptionsForExpiration>,
}

/// Calls and puts for one expiration.
#[derive(Debug, Default, Deserialize)]
pub struct OptionsForExpiration {
    /// Call contracts.
    #[serde(default)]
    pub calls: Vec<OptionContractData>,
    /// Put contracts.
    #[serde(default)]
    pub puts: Vec<OptionContractData>,
}

impl From<OptionsForExpiration> for OptionChainRows {
    fn from(data: OptionsForExpiration) -> Self {
        Self {
            calls: data.calls.into_iter().map(OptionRow::from).collect(),
            puts: data.puts.into_iter().map(OptionRow::from).collect(),
        }
    }
}

/// One option contract row.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionContractData {
    /// OCC contract symbol.
    pub contract_symbol: Option<String>,
    /// Strike price.
    pub strike: Option<f64>,
    /// Last traded price.
    pub last_price: Option<f64>,
    /// Best bid.
    pub bid: Option<f64>,
    /// Best ask.
    pub ask: Option<f64>,
    /// Session change.
    pub change: Option<f64>,
    /// Session percent change.
    pub percent_change: Option<f64>,
    /// Session volume.
    pub volume: Option<f64>,
    /// Open interest.
    pub open_interest: Option<f64>,
    /// Implied volatility.
    pub implied_volatility: Option<f64>,
    /// In-the-money flag.
    pub in_the_money: Option<bool>,
}

impl From<OptionContractData> for OptionRow {
    fn from(data: OptionContractData) -> Self {
        Self {
            contract_symbol: data.contract_symbol,
            strike: data.strike,
            last_price: data.last_price,
            bid: data.bid,
            ask: data.ask,
            change: data.change,
            percent_change: data.percent_change,
            volume: data.volume,
            open_interest: data.open_interest,
            implied_volatility: data.implied_volatility,
            in_the_money: data.in_the_money,
        }
    }
}

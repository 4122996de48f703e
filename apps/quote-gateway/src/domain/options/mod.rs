//! Option Chain Types
//!
//! Provider option rows, the normalized `OptionContract` view model, and the
//! expiry arithmetic used by the chain endpoint.
//!
//! # Normalization
//!
//! Every numeric field the provider reports as NaN (or omits) becomes `0`.
//! A missing contract symbol becomes `""` and a missing in-the-money flag
//! becomes `false`. Row order is preserved.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::symbol::Symbol;

/// Expiration date format used on the wire (`YYYY-MM-DD`).
pub const EXPIRATION_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// Types
// =============================================================================

/// Option type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    /// Call option.
    Call,
    /// Put option.
    Put,
}

/// One option row as reported by the provider.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionRow {
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
    /// Absolute change on the session.
    pub change: Option<f64>,
    /// Percent change on the session.
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

/// Calls and puts for one expiration, as reported by the provider.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionChainRows {
    /// Call rows in provider order.
    pub calls: Vec<OptionRow>,
    /// Put rows in provider order.
    pub puts: Vec<OptionRow>,
}

/// Normalized option contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionContract {
    /// OCC contract symbol.
    pub contract_symbol: String,
    /// Strike price.
    pub strike: f64,
    /// Last traded price.
    pub last_price: f64,
    /// Best bid.
    pub bid: f64,
    /// Best ask.
    pub ask: f64,
    /// Absolute change.
    pub change: f64,
    /// Percent change.
    pub percent_change: f64,
    /// Session volume.
    pub volume: u64,
    /// Open interest.
    pub open_interest: u64,
    /// Implied volatility.
    pub implied_volatility: f64,
    /// In-the-money flag.
    pub in_the_money: bool,
    /// Call or put.
    #[serde(rename = "type")]
    pub option_type: OptionType,
}

impl OptionContract {
    /// Normalize a provider row.
    #[must_use]
    pub fn from_row(row: &OptionRow, option_type: OptionType) -> Self {
        Self {
            contract_symbol: row.contract_symbol.clone().unwrap_or_default(),
            strike: number_or_zero(row.strike),
            last_price: number_or_zero(row.last_price),
            bid: number_or_zero(row.bid),
            ask: number_or_zero(row.ask),
            change: number_or_zero(row.change),
            percent_change: number_or_zero(row.percent_change),
            volume: count_or_zero(row.volume),
            open_interest: count_or_zero(row.open_interest),
            implied_volatility: number_or_zero(row.implied_volatility),
            in_the_money: row.in_the_money.unwrap_or(false),
            option_type,
        }
    }

    /// Normalize a list of rows, preserving order.
    #[must_use]
    pub fn from_rows(rows: &[OptionRow], option_type: OptionType) -> Vec<Self> {
        rows.iter()
            .map(|row| Self::from_row(row, option_type))
            .collect()
    }
}

fn number_or_zero(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn count_or_zero(value: Option<f64>) -> u64 {
    value
        .filter(|v| v.is_finite() && *v > 0.0)
        .map_or(0, |v| v.trunc() as u64)
}

// =============================================================================
// View Models
// =============================================================================

/// Expirations served by `GET /api/options/{symbol}/expirations`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpirationList {
    /// Uppercased symbol.
    pub symbol: String,
    /// Expiration dates (`YYYY-MM-DD`) in provider order.
    pub expirations: Vec<String>,
    /// Number of expirations.
    pub count: usize,
}

impl ExpirationList {
    /// Build the list; `count` always equals `expirations.len()`.
    #[must_use]
    pub fn new(symbol: &Symbol, expirations: Vec<String>) -> Self {
        let count = expirations.len();
        Self {
            symbol: symbol.as_str().to_string(),
            expirations,
            count,
        }
    }
}

/// Option chain served by `GET /api/options/{symbol}/chain`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionChain {
    /// Uppercased symbol.
    pub symbol: String,
    /// Resolved expiration date (`YYYY-MM-DD`).
    pub expiration: String,
    /// Whole days to expiry, inclusive of expiration day, floored at 0.
    pub days_to_expiry: i64,
    /// Underlying price.
    pub underlying_price: f64,
    /// Normalized calls.
    pub calls: Vec<OptionContract>,
    /// Normalized puts.
    pub puts: Vec<OptionContract>,
    /// Response construction time (ISO-8601, server local time).
    pub timestamp: String,
}

// =============================================================================
// Expiry Arithmetic
// =============================================================================

/// Malformed expiration string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("time data '{0}' does not match format 'YYYY-MM-DD'")]
pub struct ExpirationFormatError(pub String);

/// Parse a `YYYY-MM-DD` expiration date.
///
/// # Errors
///
/// Returns `ExpirationFormatError` if the string is not a valid calendar date
/// in that format.
pub fn parse_expiration(value: &str) -> Result<NaiveDate, ExpirationFormatError> {
    NaiveDate::parse_from_str(value.trim(), EXPIRATION_FORMAT)
        .map_err(|_| ExpirationFormatError(value.to_string()))
}

/// Format an expiration date as `YYYY-MM-DD`.
#[must_use]
pub fn format_expiration(date: NaiveDate) -> String {
    date.format(EXPIRATION_FORMAT).to_string()
}

/// Days to expiry: `(expiration - today) + 1`, floored at 0.
///
/// The expiration day itself counts as a trading day, so an option expiring
/// today has one day left and an expired one has none.
#[must_use]
pub fn days_to_expiry(expiration: NaiveDate, now: NaiveDateTime) -> i64 {
    let days = (expiration - now.date()).num_days() + 1;
    days.max(0)
}

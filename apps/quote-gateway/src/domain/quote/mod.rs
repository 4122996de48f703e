//! Stock Quote Types
//!
//! The provider's quote metadata record and the `Quote` view model served to
//! clients, plus the pricing rules that derive one from the other.
//!
//! # Price Resolution
//!
//! The current price is resolved by priority:
//! 1. live trading price (`current_price`)
//! 2. regular-market price
//! 3. previous close
//! 4. `0`
//!
//! A missing, zero or NaN candidate falls through to the next tier. The
//! previous close defaults to the resolved current price when the provider
//! omits it.

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};

use crate::domain::symbol::Symbol;

// =============================================================================
// Provider Record
// =============================================================================

/// Quote metadata as reported by the market data provider.
///
/// Every field is optional; the provider omits whatever it does not know.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuoteInfo {
    /// Live trading price.
    pub current_price: Option<f64>,
    /// Regular-session market price.
    pub regular_market_price: Option<f64>,
    /// Previous session close.
    pub previous_close: Option<f64>,
    /// Short display name.
    pub short_name: Option<String>,
    /// Long display name.
    pub long_name: Option<String>,
    /// Session volume.
    pub volume: Option<u64>,
    /// Market capitalization.
    pub market_cap: Option<u64>,
    /// 52-week high.
    pub fifty_two_week_high: Option<f64>,
    /// 52-week low.
    pub fifty_two_week_low: Option<f64>,
}

impl QuoteInfo {
    /// Resolve the current price using the three-tier fallback.
    #[must_use]
    pub fn resolved_price(&self) -> f64 {
        [self.current_price, self.regular_market_price]
            .into_iter()
            .flatten()
            .find(|p| is_usable_price(*p))
            .or_else(|| self.previous_close.filter(|p| !p.is_nan()))
            .unwrap_or(0.0)
    }

    /// Previous close, defaulting to `current` when absent.
    #[must_use]
    pub fn resolved_previous_close(&self, current: f64) -> f64 {
        self.previous_close
            .filter(|p| !p.is_nan())
            .unwrap_or(current)
    }

    /// Display name: short name, else long name, else the symbol itself.
    #[must_use]
    pub fn display_name(&self, symbol: &Symbol) -> String {
        [self.short_name.as_deref(), self.long_name.as_deref()]
            .into_iter()
            .flatten()
            .find(|n| !n.is_empty())
            .map_or_else(|| symbol.as_str().to_string(), str::to_string)
    }
}

fn is_usable_price(price: f64) -> bool {
    !price.is_nan() && price != 0.0
}

// =============================================================================
// Pricing Rules
// =============================================================================

/// Absolute and percent change between two prices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceChange {
    /// `current - previous`, rounded to cents.
    pub change: f64,
    /// `change / previous * 100`, rounded to 2 decimals.
    pub change_percent: f64,
}

impl PriceChange {
    /// Compute the change from `previous` to `current`.
    ///
    /// The change is 0 when either price is 0; the percent is 0 when the
    /// previous close is 0.
    #[must_use]
    pub fn between(current: f64, previous: f64) -> Self {
        let change = if current != 0.0 && previous != 0.0 {
            current - previous
        } else {
            0.0
        };
        let change_percent = if previous == 0.0 {
            0.0
        } else {
            change / previous * 100.0
        };

        Self {
            change: round_to_cents(change),
            change_percent: round_to_cents(change_percent),
        }
    }
}

/// Round to 2 decimal places, half to even on the exact binary value.
///
/// Non-finite input rounds to 0.
#[must_use]
pub fn round_to_cents(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }

    Decimal::from_f64_retain(value)
        .or_else(|| Decimal::from_f64(value))
        .map(|d| d.round_dp(2))
        .and_then(|d| d.to_f64())
        .unwrap_or(0.0)
}

// =============================================================================
// View Model
// =============================================================================

/// Stock quote served by `GET /api/stock/{symbol}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Uppercased symbol.
    pub symbol: String,
    /// Display name.
    pub name: String,
    /// Resolved current price.
    pub current_price: f64,
    /// Previous close.
    pub previous_close: f64,
    /// Absolute change.
    pub change: f64,
    /// Percent change.
    pub change_percent: f64,
    /// Session volume.
    pub volume: u64,
    /// Market capitalization.
    pub market_cap: u64,
    /// 52-week high.
    pub fifty_two_week_high: f64,
    /// 52-week low.
    pub fifty_two_week_low: f64,
    /// Response construction time (ISO-8601, server local time).
    pub timestamp: String,
}

impl Quote {
    /// Build the view model from provider metadata.
    #[must_use]
    pub fn from_info(symbol: &Symbol, info: &QuoteInfo, timestamp: String) -> Self {
        let current_price = info.resolved_price();
        let previous_close = info.resolved_previous_close(current_price);
        let PriceChange {
            change,
            change_percent,
        } = PriceChange::between(current_price, previous_close);

        Self {
            symbol: symbol.as_str().to_string(),
            name: info.display_name(symbol),
            current_price,
            previous_close,
            change,
            change_percent,
            volume: info.volume.unwrap_or(0),
            market_cap: info.market_cap.unwrap_or(0),
            fifty_two_week_high: finite_or_zero(info.fifty_two_week_high),
            fifty_two_week_low: finite_or_zero(info.fifty_two_week_low),
            timestamp,
        }
    }
}

fn finite_or_zero(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_case::test_case;

    fn info(current: Option<f64>, regular: Option<f64>, previous: Option<f64>) -> QuoteInfo {
        QuoteInfo {
            current_price: current,
            regular_market_price: regular,
            previous_close: previous,
            ..QuoteInfo::default()
        }
    }

    #[test_case(Some(105.0), Some(104.0), Some(100.0), 105.0 ; "live price wins")]
    #[test_case(None, Some(104.0), Some(100.0), 104.0 ; "regular market price second")]
    #[test_case(Some(0.0), Some(104.0), Some(100.0), 104.0 ; "zero live price falls through")]
    #[test_case(Some(f64::NAN), None, Some(100.0), 100.0 ; "nan live price falls through")]
    #[test_case(None, None, Some(100.0), 100.0 ; "previous close third")]
    #[test_case(None, None, None, 0.0 ; "nothing known is zero")]
    fn price_resolution(
        current: Option<f64>,
        regular: Option<f64>,
        previous: Option<f64>,
        expected: f64,
    ) {
        assert_eq!(info(current, regular, previous).resolved_price(), expected);
    }

    #[test]
    fn previous_close_defaults_to_current() {
        let info = info(Some(42.5), None, None);
        assert_eq!(info.resolved_previous_close(42.5), 42.5);
    }

    #[test]
    fn change_from_fixture() {
        let change = PriceChange::between(105.0, 100.0);
        assert_eq!(change.change, 5.0);
        assert_eq!(change.change_percent, 5.0);
    }

    #[test]
    fn change_is_rounded() {
        let change = PriceChange::between(101.236, 99.0);
        assert_eq!(change.change, 2.24);
        assert_eq!(change.change_percent, 2.26);
    }

    #[test]
    fn zero_previous_close_has_no_change() {
        let change = PriceChange::between(50.0, 0.0);
        assert_eq!(change.change, 0.0);
        assert_eq!(change.change_percent, 0.0);
    }

    #[test]
    fn zero_current_price_has_no_change() {
        let change = PriceChange::between(0.0, 50.0);
        assert_eq!(change.change, 0.0);
        assert_eq!(change.change_percent, 0.0);
    }

    #[test]
    fn rounding_follows_binary_value() {
        // 2.675 is stored as 2.67499999...
        assert_eq!(round_to_cents(2.675), 2.67);
        assert_eq!(round_to_cents(0.125), 0.12);
        assert_eq!(round_to_cents(-1.006), -1.01);
        assert_eq!(round_to_cents(f64::NAN), 0.0);
    }

    #[test]
    fn display_name_fallbacks() {
        let symbol = Symbol::new("aapl");
        let mut info = QuoteInfo {
            short_name: Some("Apple Inc.".to_string()),
            long_name: Some("Apple Incorporated".to_string()),
            ..QuoteInfo::default()
        };
        assert_eq!(info.display_name(&symbol), "Apple Inc.");

        info.short_name = None;
        assert_eq!(info.display_name(&symbol), "Apple Incorporated");

        info.long_name = None;
        assert_eq!(info.display_name(&symbol), "AAPL");
    }

    #[test]
    fn blank_short_name_falls_back_to_long_name() {
        let symbol = Symbol::new("aapl");
        let mut info = QuoteInfo {
            short_name: Some(String::new()),
            long_name: Some("Apple Incorporated".to_string()),
            ..QuoteInfo::default()
        };
        assert_eq!(info.display_name(&symbol), "Apple Incorporated");

        info.long_name = Some(String::new());
        assert_eq!(info.display_name(&symbol), "AAPL");
    }

    #[test]
    fn quote_from_info() {
        let symbol = Symbol::new("aapl");
        let info = QuoteInfo {
            current_price: Some(105.0),
            previous_close: Some(100.0),
            short_name: Some("Apple Inc.".to_string()),
            volume: Some(1_000_000),
            market_cap: Some(3_000_000_000_000),
            fifty_two_week_high: Some(199.62),
            fifty_two_week_low: None,
            ..QuoteInfo::default()
        };

        let quote = Quote::from_info(&symbol, &info, "2024-01-05T10:00:00.000000".to_string());

        assert_eq!(quote.symbol, "AAPL");
        assert_eq!(quote.name, "Apple Inc.");
        assert_eq!(quote.current_price, 105.0);
        assert_eq!(quote.previous_close, 100.0);
        assert_eq!(quote.change, 5.0);
        assert_eq!(quote.change_percent, 5.0);
        assert_eq!(quote.volume, 1_000_000);
        assert_eq!(quote.market_cap, 3_000_000_000_000);
        assert_eq!(quote.fifty_two_week_high, 199.62);
        assert_eq!(quote.fifty_two_week_low, 0.0);
    }

    #[test]
    fn quote_serializes_camel_case() {
        let quote = Quote::from_info(
            &Symbol::new("spy"),
            &info(Some(1.0), None, Some(1.0)),
            "2024-01-05T10:00:00.000000".to_string(),
        );
        let json = serde_json::to_value(&quote).unwrap();

        for key in [
            "symbol",
            "name",
            "currentPrice",
            "previousClose",
            "change",
            "changePercent",
            "volume",
            "marketCap",
            "fiftyTwoWeekHigh",
            "fiftyTwoWeekLow",
            "timestamp",
        ] {
            assert!(json.get(key).is_some(), "missing key {key}");
        }
    }

    proptest! {
        #[test]
        fn rounded_values_have_at_most_two_decimals(value in -1.0e6f64..1.0e6) {
            let rounded = round_to_cents(value);
            let cents = rounded * 100.0;
            prop_assert!((cents - cents.round()).abs() < 1e-6);
            prop_assert!((rounded - value).abs() <= 0.005 + 1e-9);
        }
    }
}

//! Domain Layer - Core quote and option types and pricing rules.
//!
//! This layer contains the view models served to clients and the pure
//! functions that derive them from provider records. No I/O happens here.

/// Ticker symbol value object.
pub mod symbol;

/// Stock quote record, view model and pricing rules.
pub mod quote;

/// Option rows, normalized contracts, chains and expiry arithmetic.
pub mod options;

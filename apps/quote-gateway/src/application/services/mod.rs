//! Application Services
//!
//! Services that orchestrate domain logic and coordinate between ports.
//!
//! - `QuoteService`: health, stock quote, option expirations and option chain

mod quote_service;

pub use quote_service::{HEALTH_STATUS_OK, HealthReport, QuoteService};

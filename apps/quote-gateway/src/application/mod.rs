//! Application Layer - Use cases and port definitions.
//!
//! This layer contains the application service and the port interfaces
//! that define how the domain interacts with external systems.

/// Client-facing error type.
pub mod error;

/// Port interfaces for external systems (market data provider, clock).
pub mod ports;

/// Application services implementing the gateway operations.
pub mod services;

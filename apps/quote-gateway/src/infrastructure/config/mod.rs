//! Configuration Module
//!
//! Configuration loading for the gateway service.

mod settings;

pub use settings::{
    ConfigError, DEFAULT_USER_AGENT, DEFAULT_YAHOO_COOKIE_URL, DEFAULT_YAHOO_QUERY_URL,
    GatewayConfig, ProviderSettings, ServerSettings,
};

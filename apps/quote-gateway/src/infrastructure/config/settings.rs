//! Gateway Configuration Settings
//!
//! Configuration types for the quote gateway, loaded from environment variables.

use std::path::PathBuf;
use std::time::Duration;

/// Default Yahoo Finance query API base URL.
pub const DEFAULT_YAHOO_QUERY_URL: &str = "https://query2.finance.yahoo.com";

/// Default URL hit once to obtain Yahoo session cookies.
pub const DEFAULT_YAHOO_COOKIE_URL: &str = "https://fc.yahoo.com";

/// Default upstream User-Agent. Yahoo rejects obvious non-browser clients.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36";

/// HTTP server settings.
#[derive(Debug, Clone)]
pub struct ServerSettings {
    /// Listen port. The bind address is always the wildcard address.
    pub port: u16,
    /// Directory holding the frontend (`index.html`).
    pub static_dir: PathBuf,
    /// Whether to attach a permissive CORS layer.
    pub cors_allow_any: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 5000,
            static_dir: PathBuf::from("static"),
            cors_allow_any: true,
        }
    }
}

/// Upstream provider settings.
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    /// Query API base URL (no trailing slash).
    pub query_url: String,
    /// Session cookie bootstrap URL.
    pub cookie_url: String,
    /// Whether to obtain a cookie and crumb before data calls.
    pub auth_enabled: bool,
    /// Per-request timeout.
    pub timeout: Duration,
    /// User-Agent header.
    pub user_agent: String,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            query_url: DEFAULT_YAHOO_QUERY_URL.to_string(),
            cookie_url: DEFAULT_YAHOO_COOKIE_URL.to_string(),
            auth_enabled: true,
            timeout: Duration::from_secs(10),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Complete gateway configuration.
#[derive(Debug, Clone, Default)]
pub struct GatewayConfig {
    /// HTTP server settings.
    pub server: ServerSettings,
    /// Upstream provider settings.
    pub provider: ProviderSettings,
}

impl GatewayConfig {
    /// Create configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable that must not be empty is set to an
    /// empty value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if `YAHOO_QUERY_URL` or `STATIC_DIR` is empty.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_defaults = ServerSettings::default();
        let provider_defaults = ProviderSettings::default();

        let static_dir = match lookup("STATIC_DIR") {
            Some(dir) if dir.trim().is_empty() => {
                return Err(ConfigError::EmptyValue("STATIC_DIR".to_string()));
            }
            Some(dir) => PathBuf::from(dir),
            None => server_defaults.static_dir,
        };

        let query_url = match lookup("YAHOO_QUERY_URL") {
            Some(url) if url.trim().is_empty() => {
                return Err(ConfigError::EmptyValue("YAHOO_QUERY_URL".to_string()));
            }
            Some(url) => url.trim_end_matches('/').to_string(),
            None => provider_defaults.query_url,
        };

        let server = ServerSettings {
            port: parse_or(&lookup, "PORT", server_defaults.port),
            static_dir,
            cors_allow_any: parse_bool_or(&lookup, "CORS_ALLOW_ANY", server_defaults.cors_allow_any),
        };

        let provider = ProviderSettings {
            query_url,
            cookie_url: lookup("YAHOO_COOKIE_URL")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(provider_defaults.cookie_url),
            auth_enabled: parse_bool_or(&lookup, "YAHOO_AUTH_ENABLED", provider_defaults.auth_enabled),
            timeout: lookup("YAHOO_TIMEOUT_SECS")
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map_or(provider_defaults.timeout, Duration::from_secs),
            user_agent: lookup("YAHOO_USER_AGENT")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(provider_defaults.user_agent),
        };

        Ok(Self { server, provider })
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Environment variable has empty value.
    #[error("environment variable {0} cannot be empty")]
    EmptyValue(String),
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn parse_bool_or<F>(lookup: &F, key: &str, default: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).map_or(default, |v| match v.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => true,
        "false" | "0" | "no" | "off" => false,
        _ => default,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = GatewayConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.static_dir, PathBuf::from("static"));
        assert!(config.server.cors_allow_any);
        assert_eq!(config.provider.query_url, DEFAULT_YAHOO_QUERY_URL);
        assert_eq!(config.provider.cookie_url, DEFAULT_YAHOO_COOKIE_URL);
        assert!(config.provider.auth_enabled);
        assert_eq!(config.provider.timeout, Duration::from_secs(10));
    }

    #[test]
    fn port_from_environment() {
        let config = GatewayConfig::from_lookup(lookup_from(&[("PORT", "8080")])).unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn invalid_numbers_fall_back() {
        let config = GatewayConfig::from_lookup(lookup_from(&[
            ("PORT", "eighty"),
            ("YAHOO_TIMEOUT_SECS", "0"),
        ]))
        .unwrap();

        assert_eq!(config.server.port, 5000);
        assert_eq!(config.provider.timeout, Duration::from_secs(10));
    }

    #[test]
    fn provider_overrides() {
        let config = GatewayConfig::from_lookup(lookup_from(&[
            ("YAHOO_QUERY_URL", "http://127.0.0.1:9000/"),
            ("YAHOO_AUTH_ENABLED", "false"),
            ("YAHOO_TIMEOUT_SECS", "3"),
            ("CORS_ALLOW_ANY", "off"),
        ]))
        .unwrap();

        assert_eq!(config.provider.query_url, "http://127.0.0.1:9000");
        assert!(!config.provider.auth_enabled);
        assert_eq!(config.provider.timeout, Duration::from_secs(3));
        assert!(!config.server.cors_allow_any);
    }

    #[test]
    fn empty_required_values_are_rejected() {
        let err = GatewayConfig::from_lookup(lookup_from(&[("YAHOO_QUERY_URL", " ")])).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyValue(ref key) if key == "YAHOO_QUERY_URL"));

        let err = GatewayConfig::from_lookup(lookup_from(&[("STATIC_DIR", "")])).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyValue(ref key) if key == "STATIC_DIR"));
    }
}

//! HTTP client wrapper with session crumb handling.

use parking_lot::RwLock;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::infrastructure::config::ProviderSettings;

use super::api_types::YahooErrorResponse;
use super::error::YahooError;

const CRUMB_PATH: &str = "/v1/test/getcrumb";

/// HTTP client for the Yahoo Finance query API.
///
/// When auth is enabled, a session cookie and crumb are fetched lazily on
/// the first data call and reused until the provider rejects them.
#[derive(Debug)]
pub struct YahooHttpClient {
    client: Client,
    query_url: String,
    cookie_url: String,
    auth_enabled: bool,
    crumb: RwLock<Option<String>>,
}

impl YahooHttpClient {
    /// Create a new HTTP client from settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the user agent is not a valid header value or the
    /// TLS backend cannot be initialized.
    pub fn new(settings: &ProviderSettings) -> Result<Self, YahooError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&settings.user_agent)
                .map_err(|e| YahooError::Client(format!("invalid user agent: {e}")))?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(settings.timeout)
            .default_headers(headers)
            .cookie_store(true)
            .build()
            .map_err(|e| YahooError::Client(e.to_string()))?;

        Ok(Self {
            client,
            query_url: settings.query_url.trim_end_matches('/').to_string(),
            cookie_url: settings.cookie_url.clone(),
            auth_enabled: settings.auth_enabled,
            crumb: RwLock::new(None),
        })
    }

    /// Make a GET request against the query API and decode the JSON body.
    ///
    /// # Errors
    ///
    /// Returns a categorized error for transport failures, non-2xx statuses
    /// and undecodable bodies.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, YahooError> {
        let url = format!("{}{path}", self.query_url);
        let mut params: Vec<(&str, String)> = query.to_vec();
        if let Some(crumb) = self.session_crumb().await? {
            params.push(("crumb", crumb));
        }

        tracing::debug!(url = %url, "Requesting provider");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| YahooError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| YahooError::Network(e.to_string()))?;

        if status.is_success() {
            return serde_json::from_str(&body).map_err(|e| YahooError::JsonParse(e.to_string()));
        }

        let message = serde_json::from_str::<YahooErrorResponse>(&body)
            .ok()
            .and_then(|err| err.message())
            .unwrap_or(body);

        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            self.invalidate_crumb();
        }

        Err(status_error(status, message))
    }

    /// Drop the cached crumb so the next call re-authenticates.
    pub fn invalidate_crumb(&self) {
        if self.crumb.write().take().is_some() {
            tracing::debug!("Discarded provider session crumb");
        }
    }

    async fn session_crumb(&self) -> Result<Option<String>, YahooError> {
        if !self.auth_enabled {
            return Ok(None);
        }
        let cached = self.crumb.read().clone();
        if cached.is_some() {
            return Ok(cached);
        }

        let crumb = self.fetch_crumb().await?;
        *self.crumb.write() = Some(crumb.clone());
        Ok(Some(crumb))
    }

    async fn fetch_crumb(&self) -> Result<String, YahooError> {
        // The cookie endpoint usually answers 404; only the Set-Cookie matters.
        if let Err(e) = self.client.get(&self.cookie_url).send().await {
            tracing::warn!(error = %e, "Session cookie request failed");
        }

        let response = self
            .client
            .get(format!("{}{CRUMB_PATH}", self.query_url))
            .header(ACCEPT, "text/plain")
            .send()
            .await
            .map_err(|e| YahooError::Network(e.to_string()))?;

        let status = response.status();
        let crumb = response
            .text()
            .await
            .map_err(|e| YahooError::Network(e.to_string()))?;
        let crumb = crumb.trim();

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(YahooError::RateLimited);
        }
        if !status.is_success() || crumb.is_empty() || crumb.contains('<') {
            return Err(YahooError::Unauthorized(format!(
                "crumb request failed with status {}",
                status.as_u16()
            )));
        }

        tracing::info!("Obtained provider session crumb");
        Ok(crumb.to_string())
    }
}

/// Map a non-success status to an adapter error.
fn status_error(status: StatusCode, message: String) -> YahooError {
    match status {
        StatusCode::NOT_FOUND => YahooError::NotFound(message),
        StatusCode::TOO_MANY_REQUESTS => YahooError::RateLimited,
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => YahooError::Unauthorized(message),
        _ => YahooError::Api {
            status: status.as_u16(),
            message,
        },
    }
}

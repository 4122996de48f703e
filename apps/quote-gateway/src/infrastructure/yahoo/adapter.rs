//! Yahoo Finance adapter implementing `MarketDataProvider`.

use std::time::Instant;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};

use crate::application::ports::{MarketDataProvider, ProviderError};
use crate::domain::options::{OptionChainRows, format_expiration, parse_expiration};
use crate::domain::quote::QuoteInfo;
use crate::domain::symbol::Symbol;
use crate::infrastructure::config::ProviderSettings;
use crate::infrastructure::metrics::{UpstreamOperation, record_upstream};

use super::api_types::{OptionsData, OptionsResponse, QuoteResponse};
use super::error::YahooError;
use super::http_client::YahooHttpClient;

const QUOTE_PATH: &str = "/v7/finance/quote";
const OPTIONS_PATH: &str = "/v7/finance/options";

/// Yahoo Finance market data adapter.
#[derive(Debug)]
pub struct YahooMarketDataAdapter {
    client: YahooHttpClient,
}

impl YahooMarketDataAdapter {
    /// Create a new adapter.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(settings: &ProviderSettings) -> Result<Self, YahooError> {
        Ok(Self {
            client: YahooHttpClient::new(settings)?,
        })
    }

    async fn fetch_quote(&self, symbol: &Symbol) -> Result<QuoteInfo, YahooError> {
        let response: QuoteResponse = self
            .client
            .get_json(QUOTE_PATH, &[("symbols", symbol.to_string())])
            .await?;

        response
            .quote_response
            .result
            .into_iter()
            .next()
            .map(QuoteInfo::from)
            .ok_or_else(|| YahooError::NotFound(symbol.to_string()))
    }

    async fn fetch_options(
        &self,
        symbol: &Symbol,
        date: Option<i64>,
    ) -> Result<OptionsData, YahooError> {
        let path = format!("{OPTIONS_PATH}/{symbol}");
        let query: Vec<(&str, String)> = date
            .map(|ts| vec![("date", ts.to_string())])
            .unwrap_or_default();

        let response: OptionsResponse = self.client.get_json(&path, &query).await?;

        response
            .option_chain
            .result
            .into_iter()
            .next()
            .ok_or_else(|| YahooError::NotFound(symbol.to_string()))
    }

    async fn fetch_expirations(&self, symbol: &Symbol) -> Result<Vec<String>, YahooError> {
        let data = self.fetch_options(symbol, None).await?;
        Ok(data
            .expiration_dates
            .into_iter()
            .filter_map(timestamp_to_date)
            .map(format_expiration)
            .collect())
    }

    async fn fetch_chain(
        &self,
        symbol: &Symbol,
        expiration: &str,
    ) -> Result<OptionChainRows, YahooError> {
        let requested =
            parse_expiration(expiration).map_err(|e| YahooError::InvalidExpiration(e.to_string()))?;

        let listing = self.fetch_options(symbol, None).await?;
        let listed: Vec<(NaiveDate, i64)> = listing
            .expiration_dates
            .iter()
            .filter_map(|&ts| timestamp_to_date(ts).map(|date| (date, ts)))
            .collect();

        let Some(&(_, timestamp)) = listed.iter().find(|(date, _)| *date == requested) else {
            let available: Vec<String> = listed
                .iter()
                .map(|(date, _)| format_expiration(*date))
                .collect();
            return Err(YahooError::InvalidExpiration(unlisted_expiration_message(
                expiration, &available,
            )));
        };

        let data = self.fetch_options(symbol, Some(timestamp)).await?;
        Ok(data
            .options
            .into_iter()
            .next()
            .map(OptionChainRows::from)
            .unwrap_or_default())
    }
}

#[async_trait]
impl MarketDataProvider for YahooMarketDataAdapter {
    async fn quote_info(&self, symbol: &Symbol) -> Result<QuoteInfo, ProviderError> {
        timed(UpstreamOperation::Quote, symbol, self.fetch_quote(symbol)).await
    }

    async fn expirations(&self, symbol: &Symbol) -> Result<Vec<String>, ProviderError> {
        timed(
            UpstreamOperation::Expirations,
            symbol,
            self.fetch_expirations(symbol),
        )
        .await
    }

    async fn option_chain(
        &self,
        symbol: &Symbol,
        expiration: &str,
    ) -> Result<OptionChainRows, ProviderError> {
        timed(
            UpstreamOperation::OptionChain,
            symbol,
            self.fetch_chain(symbol, expiration),
        )
        .await
    }
}

/// Run one provider operation, recording its latency and outcome.
async fn timed<T, F>(
    operation: UpstreamOperation,
    symbol: &Symbol,
    call: F,
) -> Result<T, ProviderError>
where
    F: Future<Output = Result<T, YahooError>> + Send,
{
    let started = Instant::now();
    let result = call.await;
    record_upstream(operation, started.elapsed(), result.is_ok());

    result.map_err(|e| {
        tracing::debug!(
            operation = operation.as_str(),
            symbol = %symbol,
            error = %e,
            "Provider call failed"
        );
        e.into_provider_error(symbol.as_str())
    })
}

/// Listed expirations are UTC midnight timestamps.
fn timestamp_to_date(ts: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(ts, 0).map(|dt| dt.date_naive())
}

fn unlisted_expiration_message(requested: &str, available: &[String]) -> String {
    let quoted: Vec<String> = available.iter().map(|d| format!("'{d}'")).collect();
    format!(
        "Expiration `{requested}` cannot be found. Available expirations are: [{}]",
        quoted.join(", ")
    )
}

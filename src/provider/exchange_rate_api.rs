//! ExchangeRate-API provider.
//!
//! Fetches latest and historical conversion rate tables from the
//! v6.exchangerate-api.com JSON API. The historical endpoint requires a paid
//! plan; both endpoints return the same response shape.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use reqwest::Client;
use serde::Deserialize;

use super::RateProvider;
use crate::errors::FxError;
use crate::models::CurrencyCode;

/// Provider ID constant
const PROVIDER_ID: &str = "EXCHANGE_RATE_API";

/// Production API base URL
const API_BASE_URL: &str = "https://v6.exchangerate-api.com/v6";

/// Default HTTP request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// API response from ExchangeRate-API.
///
/// Both the latest and the history endpoints return this shape; the feed
/// carries more fields (update timestamps, documentation links) that are
/// ignored here.
#[derive(Debug, Deserialize)]
struct ExchangeRateResponse {
    /// "success" on a good response; an error code string otherwise
    result: String,
    /// Base currency the rates are relative to
    #[allow(dead_code)]
    base_code: Option<String>,
    /// Rates keyed by currency code (1 base = rate target).
    /// Absent on error responses.
    #[serde(default)]
    conversion_rates: HashMap<String, f64>,
}

/// ExchangeRate-API rate provider.
///
/// # Example
///
/// ```ignore
/// use fx_rates::provider::ExchangeRateApiProvider;
///
/// let provider = ExchangeRateApiProvider::new("your_api_key".to_string());
/// ```
pub struct ExchangeRateApiProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl ExchangeRateApiProvider {
    /// Create a new provider with the given API key.
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, API_BASE_URL.to_string())
    }

    /// Create a provider pointed at a non-default base URL.
    ///
    /// Useful for stub servers and API-compatible mirrors.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_key,
            base_url,
        }
    }

    async fn fetch(&self, url: &str) -> Result<HashMap<String, f64>, FxError> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FxError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("status {}: {}", status, body),
            });
        }

        let parsed: ExchangeRateResponse = response.json().await?;

        if parsed.result != "success" {
            return Err(FxError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("result {}", parsed.result),
            });
        }

        Ok(parsed.conversion_rates)
    }
}

#[async_trait]
impl RateProvider for ExchangeRateApiProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn latest_rates(&self, base: CurrencyCode) -> Result<HashMap<String, f64>, FxError> {
        let url = format!("{}/{}/latest/{}", self.base_url, self.api_key, base);
        self.fetch(&url).await
    }

    async fn historical_rates(
        &self,
        base: CurrencyCode,
        date: NaiveDate,
    ) -> Result<HashMap<String, f64>, FxError> {
        let url = format!(
            "{}/{}/history/{}/{}/{}/{}",
            self.base_url,
            self.api_key,
            base,
            date.year(),
            date.month(),
            date.day()
        );
        self.fetch(&url).await
    }
}

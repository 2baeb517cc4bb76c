//! Rate provider trait definitions and implementations.
//!
//! A provider is the origin source of exchange rates: it answers "latest"
//! and "as of a date" queries with a raw code-to-rate map. Providers do no
//! filtering or caching of their own — the orchestrator owns both.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::FxError;
use crate::models::CurrencyCode;

pub mod exchange_rate_api;

pub use exchange_rate_api::ExchangeRateApiProvider;

/// Trait for exchange rate providers.
///
/// Implement this to add support for a new pricing source. The returned maps
/// are raw feed data keyed by whatever code strings the source serves; the
/// orchestrator filters them into a validated
/// [`RateTable`](crate::models::RateTable) at ingestion.
///
/// Implementations must be cancellation-safe: a dropped future must abort the
/// underlying request rather than leave it hanging.
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// A constant string like "EXCHANGE_RATE_API", used for logging and
    /// error context.
    fn id(&self) -> &'static str;

    /// Fetch the latest rates for the given base currency.
    ///
    /// # Returns
    ///
    /// The raw code-to-rate map relative to `base`, or an [`FxError`] on
    /// network failure or a non-success provider response.
    async fn latest_rates(&self, base: CurrencyCode) -> Result<HashMap<String, f64>, FxError>;

    /// Fetch the rates for the given base currency as of a specific date.
    ///
    /// # Returns
    ///
    /// The raw code-to-rate map relative to `base` on `date`, or an
    /// [`FxError`] on network failure or a non-success provider response.
    async fn historical_rates(
        &self,
        base: CurrencyCode,
        date: NaiveDate,
    ) -> Result<HashMap<String, f64>, FxError>;
}

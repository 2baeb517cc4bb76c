//! Consumer-facing exchange rate trait.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::errors::FxError;
use crate::models::{CurrencyCode, RateTable};

/// Capability trait for resolving exchange rates.
///
/// The conversion functions in [`conversions`](crate::conversions) consume
/// this trait; [`RateService`](super::RateService) is the production
/// implementation. Test doubles implement it with fixed tables.
#[async_trait]
pub trait ExchangeRates: Send + Sync {
    /// All latest rates relative to `from`.
    async fn latest_rates(&self, from: CurrencyCode) -> Result<RateTable, FxError>;

    /// The latest rate from one currency to another.
    async fn latest_rate(&self, from: CurrencyCode, to: CurrencyCode) -> Result<Decimal, FxError>;

    /// The rate from one currency to another as of `date`.
    ///
    /// A date equal to the current UTC day is answered by the latest path.
    async fn historical_rate(
        &self,
        from: CurrencyCode,
        to: CurrencyCode,
        date: NaiveDate,
    ) -> Result<Decimal, FxError>;
}

//! Rate cache orchestrator.
//!
//! Resolves rate tables for a base currency with cache-aside refill: check
//! the two-tier cache, on miss fetch from the provider, filter, store, and
//! return the in-hand table. Latest and historical queries use different
//! cache policies — see [`RateService::latest_rates`] and
//! [`RateService::historical_rate`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;

use super::traits::ExchangeRates;
use crate::cache::{SetOptions, TieredCache};
use crate::errors::FxError;
use crate::models::{CurrencyCode, RateTable};
use crate::provider::RateProvider;

/// Distributed-tier expiry for latest rate tables. Latest rates age quickly.
const LATEST_RATES_EXPIRY: Duration = Duration::from_secs(5 * 60);

fn latest_key(from: CurrencyCode) -> String {
    format!("{}-latest", from)
}

fn historical_key(date: NaiveDate, from: CurrencyCode) -> String {
    format!("{}{}", date.format("%Y-%m-%d"), from)
}

fn rate_not_found(from: CurrencyCode, to: CurrencyCode) -> FxError {
    FxError::RateNotFound {
        from: from.to_string(),
        to: to.to_string(),
    }
}

/// Orchestrates rate resolution across the cache and a rate provider.
///
/// Owns all cache-population side effects; the conversion engine only ever
/// reads resolved rates through the [`ExchangeRates`] trait. Provider errors
/// propagate to the caller unmodified — retry policy belongs to the caller.
#[derive(Clone)]
pub struct RateService {
    cache: TieredCache,
    provider: Arc<dyn RateProvider>,
}

impl RateService {
    /// Create a service over the given cache and provider.
    pub fn new(cache: TieredCache, provider: Arc<dyn RateProvider>) -> Self {
        Self { cache, provider }
    }

    /// All latest rates relative to `from`.
    ///
    /// Cache key `"{from}-latest"`, local-tier read allowed, 5-minute expiry
    /// on refill. On a miss the freshly fetched table is returned directly —
    /// the cache is never re-read after a refill, so each miss costs exactly
    /// one provider call even if the cache write failed.
    pub async fn latest_rates(&self, from: CurrencyCode) -> Result<RateTable, FxError> {
        let key = latest_key(from);
        if let Some(table) = self.cache.get::<RateTable>(&key, true).await {
            return Ok(table);
        }

        let raw = self.provider.latest_rates(from).await?;
        let table = RateTable::from_raw(&raw);
        self.cache
            .set(&key, &table, SetOptions::with_expiry(LATEST_RATES_EXPIRY))
            .await;
        Ok(table)
    }

    /// The latest rate from one currency to another.
    pub async fn latest_rate(
        &self,
        from: CurrencyCode,
        to: CurrencyCode,
    ) -> Result<Decimal, FxError> {
        let rates = self.latest_rates(from).await?;
        rates.rate_for(to).ok_or_else(|| rate_not_found(from, to))
    }

    /// The rate from one currency to another as of `date`.
    ///
    /// A date equal to the current UTC day is delegated to the latest path —
    /// historical and latest converge on "today" and share a cache key.
    /// Past dates use key `"{date}{from}"`, read directly from the
    /// distributed tier (historical entries are immutable; the local tier's
    /// independent eviction clock adds nothing but staleness risk), and are
    /// stored with no expiry on refill.
    pub async fn historical_rate(
        &self,
        from: CurrencyCode,
        to: CurrencyCode,
        date: NaiveDate,
    ) -> Result<Decimal, FxError> {
        if date == Utc::now().date_naive() {
            return self.latest_rate(from, to).await;
        }

        let key = historical_key(date, from);
        if let Some(table) = self.cache.get::<RateTable>(&key, false).await {
            return table.rate_for(to).ok_or_else(|| rate_not_found(from, to));
        }

        let raw = self.provider.historical_rates(from, date).await?;
        let table = RateTable::from_raw(&raw);
        self.cache.set(&key, &table, SetOptions::default()).await;
        table.rate_for(to).ok_or_else(|| rate_not_found(from, to))
    }

    /// [`historical_rate`](Self::historical_rate) with a manually pinned
    /// override table.
    ///
    /// If `overrides` has an entry for `to`, it is returned without touching
    /// the cache or the provider — this supports deterministic testing and
    /// manual rate pinning. Otherwise the normal historical path runs.
    pub async fn historical_rate_with_overrides(
        &self,
        from: CurrencyCode,
        to: CurrencyCode,
        date: NaiveDate,
        overrides: &RateTable,
    ) -> Result<Decimal, FxError> {
        if let Some(rate) = overrides.rate_for(to) {
            return Ok(rate);
        }
        self.historical_rate(from, to, date).await
    }
}

#[async_trait]
impl ExchangeRates for RateService {
    async fn latest_rates(&self, from: CurrencyCode) -> Result<RateTable, FxError> {
        RateService::latest_rates(self, from).await
    }

    async fn latest_rate(&self, from: CurrencyCode, to: CurrencyCode) -> Result<Decimal, FxError> {
        RateService::latest_rate(self, from, to).await
    }

    async fn historical_rate(
        &self,
        from: CurrencyCode,
        to: CurrencyCode,
        date: NaiveDate,
    ) -> Result<Decimal, FxError> {
        RateService::historical_rate(self, from, to, date).await
    }
}

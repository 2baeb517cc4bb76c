//! Currency conversion arithmetic over [`Money`] amounts.
//!
//! All functions here are stateless: a rate is resolved once through the
//! [`ExchangeRates`] capability (or taken from an override table) and applied
//! with the crate-wide rounding rule — the product in minor units is rounded
//! to two decimal places with banker's rounding, then truncated to an
//! integer.
//!
//! Converting an amount to its own currency short-circuits before any rate
//! lookup: same-currency conversions are always exact and side-effect-free.

use std::future::Future;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::converter::ExchangeRates;
use crate::errors::FxError;
use crate::models::money::{integer_part, round_to_cents};
use crate::models::{CurrencyCode, Money, RateTable};

/// Convert `from` into `to` at the latest rate.
pub async fn amount_in(
    from: &Money,
    to: CurrencyCode,
    rates: &dyn ExchangeRates,
) -> Result<Money, FxError> {
    amount_in_helper(from, to, || rates.latest_rate(from.currency(), to)).await
}

/// Convert `from` into `to` at the latest rate, then add it to `add_to`.
///
/// `add_to` must already be denominated in `to`; otherwise the addition
/// fails with [`FxError::CurrencyMismatch`].
pub async fn amount_in_and_add(
    from: &Money,
    add_to: &Money,
    to: CurrencyCode,
    rates: &dyn ExchangeRates,
) -> Result<Money, FxError> {
    let out = amount_in(from, to, rates).await?;
    add_to.add(&out)
}

/// Convert `from` into `to` at the rate as of `date`.
pub async fn amount_in_historical(
    from: &Money,
    to: CurrencyCode,
    date: NaiveDate,
    rates: &dyn ExchangeRates,
) -> Result<Money, FxError> {
    amount_in_helper(from, to, || {
        rates.historical_rate(from.currency(), to, date)
    })
    .await
}

/// Convert `from` into `to` at the rate as of `date`, then add it to `add_to`.
pub async fn amount_in_historical_and_add(
    from: &Money,
    add_to: &Money,
    to: CurrencyCode,
    date: NaiveDate,
    rates: &dyn ExchangeRates,
) -> Result<Money, FxError> {
    let out = amount_in_historical(from, to, date, rates).await?;
    add_to.add(&out)
}

/// Convert `from` into `to` using a pinned rate from `overrides` when one
/// exists, falling back to the historical rate as of `date`.
///
/// An override hit performs no rate lookup at all, which makes conversions
/// deterministic in tests and lets callers pin rates manually.
pub async fn amount_in_historical_with_rates(
    from: &Money,
    to: CurrencyCode,
    date: NaiveDate,
    rates: &dyn ExchangeRates,
    overrides: &RateTable,
) -> Result<Money, FxError> {
    if let Some(rate) = overrides.rate_for(to) {
        return amount_in_helper(from, to, || async move { Ok(rate) }).await;
    }
    amount_in_historical(from, to, date, rates).await
}

/// Apply a resolved rate to an amount.
///
/// The identity case returns the input unchanged without invoking the
/// resolver. The product is computed in exact decimal, rounded to two
/// decimal places (banker's rounding), and truncated to integer minor units.
async fn amount_in_helper<F, Fut>(
    from: &Money,
    to: CurrencyCode,
    resolve: F,
) -> Result<Money, FxError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Decimal, FxError>>,
{
    if from.currency() == to {
        return Ok(*from);
    }

    let rate = resolve().await?;
    let product = Decimal::from(from.amount()) * rate;
    let amount = integer_part(round_to_cents(product))?;
    Ok(Money::new(amount, to))
}

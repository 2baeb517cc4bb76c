//! Monetary amounts in integer minor units.

use std::fmt;

use num_traits::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::currency::CurrencyCode;
use crate::errors::FxError;

/// An exact monetary amount: integer minor units (e.g. cents) tagged with a
/// currency code.
///
/// `Money` is an immutable value type; arithmetic produces new values. The
/// amount is always an integer, so no fractional minor units can exist.
/// Amounts crossing the decimal boundary ([`from_decimal`](Self::from_decimal),
/// [`from_f64`](Self::from_f64)) are rounded to two decimal places with
/// banker's rounding before scaling — the same rule the conversion engine
/// applies, so the two boundaries can never disagree by a minor unit.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    amount: i64,
    currency: CurrencyCode,
}

impl Money {
    /// Create a new amount from integer minor units.
    pub const fn new(amount: i64, currency: CurrencyCode) -> Self {
        Self { amount, currency }
    }

    /// A zero amount in the given currency.
    pub const fn zero(currency: CurrencyCode) -> Self {
        Self::new(0, currency)
    }

    /// The amount in minor units.
    pub const fn amount(&self) -> i64 {
        self.amount
    }

    /// The currency of the amount.
    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }

    /// Whether the amount is exactly zero.
    pub const fn is_zero(&self) -> bool {
        self.amount == 0
    }

    /// Add another amount in the same currency.
    ///
    /// Adding across currencies is a caller-contract error and yields
    /// [`FxError::CurrencyMismatch`]; it is never silently coerced.
    pub fn add(&self, other: &Money) -> Result<Money, FxError> {
        if self.currency != other.currency {
            return Err(FxError::CurrencyMismatch {
                expected: self.currency.to_string(),
                actual: other.currency.to_string(),
            });
        }
        let amount = self
            .amount
            .checked_add(other.amount)
            .ok_or_else(|| FxError::InvalidAmount("amount overflow".to_string()))?;
        Ok(Money::new(amount, self.currency))
    }

    /// Build an amount from a decimal in major units (e.g. `100.10` dollars).
    ///
    /// The input is rounded to two decimal places and scaled by 100 to obtain
    /// integer minor units.
    pub fn from_decimal(amount: Decimal, currency: CurrencyCode) -> Result<Money, FxError> {
        let minor = round_to_cents(amount) * Decimal::ONE_HUNDRED;
        Ok(Money::new(integer_part(minor)?, currency))
    }

    /// Build an amount from a float in major units.
    ///
    /// Non-finite inputs yield [`FxError::InvalidAmount`].
    pub fn from_f64(amount: f64, currency: CurrencyCode) -> Result<Money, FxError> {
        let decimal = Decimal::try_from(amount)
            .map_err(|e| FxError::InvalidAmount(format!("{}: {}", amount, e)))?;
        Self::from_decimal(decimal, currency)
    }
}

impl fmt::Debug for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}

/// Round to two decimal places using banker's rounding (midpoint to even),
/// the crate-wide rounding rule.
pub(crate) fn round_to_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
}

/// Truncate a decimal to its integer part as an `i64`.
pub(crate) fn integer_part(value: Decimal) -> Result<i64, FxError> {
    value
        .trunc()
        .to_i64()
        .ok_or_else(|| FxError::InvalidAmount(format!("{} out of range", value)))
}

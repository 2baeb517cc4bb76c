//! Exchange rate tables keyed by currency code.

use std::collections::HashMap;

use num_traits::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::currency::CurrencyCode;

/// A table of exchange rates relative to an implicit base currency.
///
/// Invariant: the table never contains a zero or negative rate. Raw feed
/// entries that are non-positive, or whose currency code is not a known
/// ISO 4217 code, are dropped at ingestion ([`from_raw`](Self::from_raw))
/// rather than stored — they indicate unsupported or malformed source data,
/// and a smaller table is still a valid table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateTable {
    rates: HashMap<CurrencyCode, Decimal>,
}

impl RateTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from a raw provider rate map.
    ///
    /// Not all codes returned by upstream feeds are ISO 4217; unparseable
    /// codes are skipped silently, as are non-positive or non-representable
    /// rates. Filtering is not an error — the fetch still succeeds.
    pub fn from_raw(raw: &HashMap<String, f64>) -> Self {
        let mut rates = HashMap::with_capacity(raw.len());
        for (code, value) in raw {
            let Ok(currency) = CurrencyCode::parse(code) else {
                continue;
            };
            let Some(rate) = Decimal::from_f64(*value) else {
                continue;
            };
            if rate <= Decimal::ZERO {
                continue;
            }
            rates.insert(currency, rate);
        }
        Self { rates }
    }

    /// The rate for a currency, if the table has one.
    pub fn rate_for(&self, currency: CurrencyCode) -> Option<Decimal> {
        self.rates.get(&currency).copied()
    }

    /// Whether the table has a rate for the currency.
    pub fn contains(&self, currency: CurrencyCode) -> bool {
        self.rates.contains_key(&currency)
    }

    /// Insert a rate. Used for manually pinned override tables.
    pub fn insert(&mut self, currency: CurrencyCode, rate: Decimal) {
        self.rates.insert(currency, rate);
    }

    /// Number of rates in the table.
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl FromIterator<(CurrencyCode, Decimal)> for RateTable {
    fn from_iter<I: IntoIterator<Item = (CurrencyCode, Decimal)>>(iter: I) -> Self {
        Self {
            rates: iter.into_iter().collect(),
        }
    }
}

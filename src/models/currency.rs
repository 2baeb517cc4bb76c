//! ISO 4217 currency codes.
//!
//! Upstream rate feeds include codes that are not part of ISO 4217 (regional
//! pegs, fantasy codes for territories). Everything entering the crate goes
//! through [`CurrencyCode::parse`], which checks the code against a static
//! registry of active ISO 4217 codes so that unsupported entries can be
//! dropped at the boundary.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::FxError;

/// Active ISO 4217 alphabetic codes, sorted for binary search.
static ISO_4217_CODES: &[&str] = &[
    "AED", "AFN", "ALL", "AMD", "ANG", "AOA", "ARS", "AUD", "AWG", "AZN", "BAM", "BBD", "BDT",
    "BGN", "BHD", "BIF", "BMD", "BND", "BOB", "BRL", "BSD", "BTN", "BWP", "BYN", "BZD", "CAD",
    "CDF", "CHF", "CLP", "CNY", "COP", "CRC", "CUP", "CVE", "CZK", "DJF", "DKK", "DOP", "DZD",
    "EGP", "ERN", "ETB", "EUR", "FJD", "FKP", "GBP", "GEL", "GHS", "GIP", "GMD", "GNF", "GTQ",
    "GYD", "HKD", "HNL", "HRK", "HTG", "HUF", "IDR", "ILS", "INR", "IQD", "IRR", "ISK", "JMD",
    "JOD", "JPY", "KES", "KGS", "KHR", "KMF", "KPW", "KRW", "KWD", "KYD", "KZT", "LAK", "LBP",
    "LKR", "LRD", "LSL", "LYD", "MAD", "MDL", "MGA", "MKD", "MMK", "MNT", "MOP", "MRU", "MUR",
    "MVR", "MWK", "MXN", "MYR", "MZN", "NAD", "NGN", "NIO", "NOK", "NPR", "NZD", "OMR", "PAB",
    "PEN", "PGK", "PHP", "PKR", "PLN", "PYG", "QAR", "RON", "RSD", "RUB", "RWF", "SAR", "SBD",
    "SCR", "SDG", "SEK", "SGD", "SHP", "SLE", "SLL", "SOS", "SRD", "SSP", "STN", "SVC", "SYP",
    "SZL", "THB", "TJS", "TMT", "TND", "TOP", "TRY", "TTD", "TWD", "TZS", "UAH", "UGX", "USD",
    "UYU", "UZS", "VES", "VND", "VUV", "WST", "XAF", "XCD", "XOF", "XPF", "YER", "ZAR", "ZMW",
    "ZWL",
];

/// A validated ISO 4217 currency code.
///
/// Construction goes through [`parse`](Self::parse); a `CurrencyCode` in hand
/// is guaranteed to be one of the registered active codes. The type is `Copy`
/// and serializes as its three-letter string form, so it can be used directly
/// as a JSON map key in cached rate tables.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CurrencyCode(&'static str);

impl CurrencyCode {
    /// United States dollar.
    pub const USD: CurrencyCode = CurrencyCode("USD");
    /// Euro.
    pub const EUR: CurrencyCode = CurrencyCode("EUR");
    /// Pound sterling.
    pub const GBP: CurrencyCode = CurrencyCode("GBP");
    /// Japanese yen.
    pub const JPY: CurrencyCode = CurrencyCode("JPY");
    /// Swiss franc.
    pub const CHF: CurrencyCode = CurrencyCode("CHF");
    /// Canadian dollar.
    pub const CAD: CurrencyCode = CurrencyCode("CAD");
    /// Australian dollar.
    pub const AUD: CurrencyCode = CurrencyCode("AUD");

    /// Parse a currency code, validating it against the ISO 4217 registry.
    ///
    /// Matching is case-insensitive; the returned code is always uppercase.
    /// Unknown or malformed codes yield [`FxError::UnsupportedCurrency`].
    pub fn parse(code: &str) -> Result<Self, FxError> {
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(FxError::UnsupportedCurrency(code.to_string()));
        }
        let upper = code.to_ascii_uppercase();
        ISO_4217_CODES
            .binary_search(&upper.as_str())
            .map(|idx| CurrencyCode(ISO_4217_CODES[idx]))
            .map_err(|_| FxError::UnsupportedCurrency(code.to_string()))
    }

    /// The three-letter string form of the code.
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl fmt::Debug for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl Serialize for CurrencyCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.0)
    }
}

impl<'de> Deserialize<'de> for CurrencyCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CodeVisitor;

        impl Visitor<'_> for CodeVisitor {
            type Value = CurrencyCode;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an ISO 4217 currency code")
            }

            fn visit_str<E>(self, value: &str) -> Result<CurrencyCode, E>
            where
                E: de::Error,
            {
                CurrencyCode::parse(value).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(CodeVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_codes() {
        assert_eq!(CurrencyCode::parse("USD").unwrap(), CurrencyCode::USD);
        assert_eq!(CurrencyCode::parse("GBP").unwrap(), CurrencyCode::GBP);
        assert_eq!(CurrencyCode::parse("JPY").unwrap().as_str(), "JPY");
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(CurrencyCode::parse("usd").unwrap(), CurrencyCode::USD);
        assert_eq!(CurrencyCode::parse("gBp").unwrap(), CurrencyCode::GBP);
    }

    #[test]
    fn test_parse_rejects_unknown_codes() {
        // Codes the upstream feed serves that are not ISO 4217
        assert!(CurrencyCode::parse("FOK").is_err());
        assert!(CurrencyCode::parse("KID").is_err());
    }

    #[test]
    fn test_parse_rejects_malformed_codes() {
        assert!(CurrencyCode::parse("").is_err());
        assert!(CurrencyCode::parse("US").is_err());
        assert!(CurrencyCode::parse("USDT").is_err());
        assert!(CurrencyCode::parse("U$D").is_err());
    }

    #[test]
    fn test_registry_is_sorted() {
        let mut sorted = ISO_4217_CODES.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, ISO_4217_CODES);
    }

    #[test]
    fn test_serde_round_trip() {
        let json = serde_json::to_string(&CurrencyCode::EUR).unwrap();
        assert_eq!(json, "\"EUR\"");
        let back: CurrencyCode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, CurrencyCode::EUR);
    }

    #[test]
    fn test_deserialize_rejects_unknown() {
        let result: Result<CurrencyCode, _> = serde_json::from_str("\"FOK\"");
        assert!(result.is_err());
    }
}

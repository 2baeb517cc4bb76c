//! Error types for the fx-rates crate.

use thiserror::Error;

/// Errors that can occur while resolving rates or converting amounts.
///
/// Cache-layer failures never surface here: the cache is fail-open and
/// degrades to a miss. Everything in this enum is either a provider
/// failure the caller must decide how to handle, or a caller-contract
/// violation.
#[derive(Error, Debug)]
pub enum FxError {
    /// The currency code is malformed or not a known ISO 4217 code.
    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),

    /// Two amounts in different currencies were combined without conversion.
    #[error("Currency mismatch: expected {expected}, got {actual}")]
    CurrencyMismatch {
        /// The currency the operation required
        expected: String,
        /// The currency actually supplied
        actual: String,
    },

    /// The resolved rate table has no entry for the requested currency.
    #[error("Exchange rate not found for {from}/{to}")]
    RateNotFound {
        /// Base currency of the lookup
        from: String,
        /// Target currency of the lookup
        to: String,
    },

    /// A monetary amount could not be represented in integer minor units.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// The rate provider returned a non-success response.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// A network error occurred while communicating with the provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

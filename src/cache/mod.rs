//! Two-tier caching: a process-local moka tier in front of a distributed
//! key/value store reached through the [`CacheStore`] trait.

use std::time::Duration;

pub mod store;
pub mod tiered;

pub use store::{CacheError, CacheStore, InMemoryStore};
pub use tiered::{SetOptions, TieredCache};

/// One minute.
pub const ONE_MINUTE: Duration = Duration::from_secs(60);

/// One hour.
pub const ONE_HOUR: Duration = Duration::from_secs(60 * 60);

/// One day.
pub const ONE_DAY: Duration = Duration::from_secs(60 * 60 * 24);

/// Thirty days.
pub const THIRTY_DAYS: Duration = Duration::from_secs(60 * 60 * 24 * 30);

//! Template listing cache.
//!
//! Listings fetched from a repository are kept in a [`KeyValueStore`]
//! with a time-to-live and an upper bound on the number of entries.
//! Settings are re-read on every operation, so changes take effect
//! without restarting.
//!
//! [`KeyValueStore`]: crate::state::KeyValueStore

pub mod entry;
pub mod store;
pub mod validation;

pub use entry::{least_recently_used, AccessTimes, CacheEntry};
pub use store::{CacheStats, CacheStore, ACCESS_TIMES_KEY, CACHE_PREFIX, ENTRY_PREFIX};
pub use validation::{decode_access_times, decode_entry, format_duration};

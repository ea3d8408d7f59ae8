//! Cache entry and access-time types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::registry::TemplateMetadata;

/// A cached template listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Record layout version.
    pub version: u32,
    /// Templates in listing order (sorted by name).
    pub templates: Vec<TemplateMetadata>,
    /// When this entry was written, in Unix milliseconds.
    pub stored_at_ms: i64,
    /// Identifier of the remote state this listing was built from.
    /// Empty means "not tracked".
    #[serde(default)]
    pub tree_hash: String,
}

impl CacheEntry {
    /// Current record layout version.
    pub const CURRENT_VERSION: u32 = 1;

    /// Create an entry stamped at `stored_at_ms`.
    pub fn new(
        templates: Vec<TemplateMetadata>,
        stored_at_ms: i64,
        tree_hash: impl Into<String>,
    ) -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            templates,
            stored_at_ms,
            tree_hash: tree_hash.into(),
        }
    }

    /// Age of the entry at `now_ms`.
    pub fn age_ms(&self, now_ms: i64) -> i64 {
        now_ms - self.stored_at_ms
    }

    /// Whether the entry is younger than `ttl_ms` at `now_ms`.
    pub fn is_fresh(&self, now_ms: i64, ttl_ms: i64) -> bool {
        self.age_ms(now_ms) < ttl_ms
    }
}

/// Last access time per cache key, in Unix milliseconds.
pub type AccessTimes = BTreeMap<String, i64>;

/// Pick the least recently used key among `keys`.
///
/// Keys with no recorded access count as oldest. Ties go to the first key
/// in `keys` order.
pub fn least_recently_used<'a>(keys: &'a [String], times: &AccessTimes) -> Option<&'a String> {
    keys.iter()
        .min_by_key(|key| times.get(key.as_str()).copied().unwrap_or(i64::MIN))
}

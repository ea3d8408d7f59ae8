//! Cache storage implementation.
//!
//! Listings are stored in a [`KeyValueStore`] under a fixed prefix, one
//! record per cache key, next to a single access-time table used for LRU
//! eviction. Settings are re-read from the [`ConfigProvider`] on every
//! operation.

use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};

use super::entry::{least_recently_used, AccessTimes, CacheEntry};
use super::validation::{decode_access_times, decode_entry};
use crate::clock::{Clock, SystemClock};
use crate::config::{CacheConfig, ConfigProvider};
use crate::error::{Result, TemplateError};
use crate::registry::TemplateMetadata;
use crate::state::KeyValueStore;

/// Prefix shared by every key the cache writes.
pub const CACHE_PREFIX: &str = "steering.cache.";
/// Prefix of individual entry records.
pub const ENTRY_PREFIX: &str = "steering.cache.entry.";
/// Key of the access-time table.
pub const ACCESS_TIMES_KEY: &str = "steering.cache.access-times";

/// Snapshot of cache contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub total_entries: usize,
    pub fresh_entries: usize,
    pub stale_entries: usize,
    pub configuration: CacheConfig,
}

/// Bounded, TTL-aware cache of template listings.
pub struct CacheStore {
    store: Arc<dyn KeyValueStore>,
    settings: Arc<dyn ConfigProvider>,
    clock: Arc<dyn Clock>,
    lock: Mutex<()>,
}

impl CacheStore {
    /// Create a cache over `store`, configured by `settings`.
    pub fn new(store: Arc<dyn KeyValueStore>, settings: Arc<dyn ConfigProvider>) -> Self {
        Self {
            store,
            settings,
            clock: Arc::new(SystemClock),
            lock: Mutex::new(()),
        }
    }

    /// Replace the clock.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Currently effective settings.
    pub fn config(&self) -> CacheConfig {
        CacheConfig::resolve(self.settings.as_ref())
    }

    /// Fresh templates for `key`, if any.
    ///
    /// Reading a stale entry deletes it. Reading a fresh entry records the
    /// access for LRU eviction. A record that cannot be decoded is deleted
    /// and reported as [`TemplateError::CacheCorrupted`].
    pub fn get(&self, key: &str) -> Result<Option<Vec<TemplateMetadata>>> {
        let _guard = self.lock();

        let Some(raw) = self.store.get(&entry_key(key))? else {
            tracing::debug!("Cache miss for '{}'", key);
            return Ok(None);
        };

        let entry = match decode_entry(raw) {
            Ok(entry) => entry,
            Err(message) => {
                tracing::warn!("Discarding corrupted cache entry '{}': {}", key, message);
                self.remove(key)?;
                return Err(TemplateError::CacheCorrupted {
                    key: key.to_string(),
                    message,
                });
            }
        };

        let now = self.clock.now_ms();
        if !entry.is_fresh(now, self.config().ttl_ms()) {
            tracing::debug!("Cache entry '{}' is stale, removing", key);
            self.remove(key)?;
            return Ok(None);
        }

        self.touch(key, now)?;
        tracing::debug!("Cache hit for '{}'", key);
        Ok(Some(entry.templates))
    }

    /// Store `templates` under `key`, replacing any previous entry.
    ///
    /// Inserting a new key into a full cache evicts the least recently
    /// used entry first. Overwriting an existing key never evicts.
    pub fn put(&self, key: &str, templates: Vec<TemplateMetadata>, tree_hash: &str) -> Result<()> {
        let _guard = self.lock();

        let record_key = entry_key(key);
        if self.store.get(&record_key)?.is_none() {
            self.evict_if_full()?;
        }

        let now = self.clock.now_ms();
        let entry = CacheEntry::new(templates, now, tree_hash);
        let value = serde_json::to_value(&entry).map_err(anyhow::Error::from)?;
        self.store.update(&record_key, Some(value))?;
        self.touch(key, now)?;

        tracing::debug!(
            "Cached {} templates under '{}'",
            entry.templates.len(),
            key
        );
        Ok(())
    }

    /// Remove the entry for `key`. Missing keys are ignored.
    pub fn invalidate(&self, key: &str) -> Result<()> {
        let _guard = self.lock();
        self.remove(key)
    }

    /// Remove every cache record, leaving unrelated keys in the store alone.
    ///
    /// Returns the number of listings removed.
    pub fn clear_all(&self) -> Result<usize> {
        let _guard = self.lock();

        let mut removed = 0;
        for key in self.store.keys()? {
            if !key.starts_with(CACHE_PREFIX) {
                continue;
            }
            if key.starts_with(ENTRY_PREFIX) {
                removed += 1;
            }
            self.store.update(&key, None)?;
        }

        tracing::debug!("Cleared {} cache entries", removed);
        Ok(removed)
    }

    /// Whether `key` holds an entry younger than the TTL.
    ///
    /// Unlike [`CacheStore::get`], this neither records access nor deletes.
    pub fn is_fresh(&self, key: &str) -> Result<bool> {
        let _guard = self.lock();
        Ok(self.load_fresh(key)?.is_some())
    }

    /// Whether `key` is fresh and was stored with exactly `expected_hash`.
    pub fn is_valid(&self, key: &str, expected_hash: &str) -> Result<bool> {
        let _guard = self.lock();
        Ok(self
            .load_fresh(key)?
            .is_some_and(|entry| entry.tree_hash == expected_hash))
    }

    /// Count entries by freshness. Has no side effects.
    pub fn stats(&self) -> Result<CacheStats> {
        let _guard = self.lock();

        let configuration = self.config();
        let now = self.clock.now_ms();

        let mut total_entries = 0;
        let mut fresh_entries = 0;
        for record_key in self.entry_record_keys()? {
            total_entries += 1;
            let fresh = self
                .store
                .get(&record_key)?
                .and_then(|raw| decode_entry(raw).ok())
                .is_some_and(|entry| entry.is_fresh(now, configuration.ttl_ms()));
            if fresh {
                fresh_entries += 1;
            }
        }

        Ok(CacheStats {
            total_entries,
            fresh_entries,
            stale_entries: total_entries - fresh_entries,
            configuration,
        })
    }

    /// Cache keys of all stored entries, fresh or not.
    pub fn keys(&self) -> Result<Vec<String>> {
        let _guard = self.lock();
        Ok(self
            .entry_record_keys()?
            .into_iter()
            .map(|k| k[ENTRY_PREFIX.len()..].to_string())
            .collect())
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn load_fresh(&self, key: &str) -> Result<Option<CacheEntry>> {
        let Some(raw) = self.store.get(&entry_key(key))? else {
            return Ok(None);
        };
        let Ok(entry) = decode_entry(raw) else {
            return Ok(None);
        };

        let ttl_ms = self.config().ttl_ms();
        Ok(Some(entry).filter(|e| e.is_fresh(self.clock.now_ms(), ttl_ms)))
    }

    fn entry_record_keys(&self) -> Result<Vec<String>> {
        Ok(self
            .store
            .keys()?
            .into_iter()
            .filter(|k| k.starts_with(ENTRY_PREFIX))
            .collect())
    }

    fn access_times(&self) -> Result<AccessTimes> {
        Ok(decode_access_times(self.store.get(ACCESS_TIMES_KEY)?))
    }

    fn save_access_times(&self, times: &AccessTimes) -> Result<()> {
        let value = serde_json::to_value(times).map_err(anyhow::Error::from)?;
        self.store.update(ACCESS_TIMES_KEY, Some(value))
    }

    fn touch(&self, key: &str, now: i64) -> Result<()> {
        let mut times = self.access_times()?;
        times.insert(key.to_string(), now);
        self.save_access_times(&times)
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.store.update(&entry_key(key), None)?;

        let mut times = self.access_times()?;
        if times.remove(key).is_some() {
            self.save_access_times(&times)?;
        }
        Ok(())
    }

    /// Evict one entry when the live count has reached the bound.
    fn evict_if_full(&self) -> Result<()> {
        let max_entries = self.config().max_entries;
        let keys: Vec<String> = self
            .entry_record_keys()?
            .into_iter()
            .map(|k| k[ENTRY_PREFIX.len()..].to_string())
            .collect();

        if keys.len() < max_entries {
            return Ok(());
        }

        let times = self.access_times()?;
        if let Some(victim) = least_recently_used(&keys, &times) {
            tracing::debug!(
                "Cache full ({}/{}), evicting '{}'",
                keys.len(),
                max_entries,
                victim
            );
            self.remove(victim)?;
        }
        Ok(())
    }
}

fn entry_key(key: &str) -> String {
    format!("{}{}", ENTRY_PREFIX, key)
}

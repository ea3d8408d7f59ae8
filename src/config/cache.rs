//! Cache settings resolution.

use serde_yaml::Value;

use super::ConfigProvider;

/// Effective cache settings after defaulting and clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct CacheConfig {
    /// Time-to-live for cached listings, in seconds.
    pub ttl_seconds: u64,
    /// Maximum number of cached listings.
    pub max_entries: usize,
}

impl CacheConfig {
    /// Setting name for the TTL.
    pub const TTL_SETTING: &'static str = "cache.ttl";
    /// Setting name for the entry bound.
    pub const MAX_ENTRIES_SETTING: &'static str = "cache.max_entries";

    pub const DEFAULT_TTL_SECONDS: u64 = 300;
    pub const MIN_TTL_SECONDS: u64 = 60;
    pub const MAX_TTL_SECONDS: u64 = 3600;

    pub const DEFAULT_MAX_ENTRIES: usize = 100;
    pub const MIN_MAX_ENTRIES: usize = 10;
    pub const MAX_MAX_ENTRIES: usize = 1000;

    /// Read the current settings from `provider`.
    ///
    /// Missing or non-numeric values fall back to defaults, numeric values
    /// are truncated and clamped to their bounds. A provider that fails to
    /// read is logged and treated as "nothing configured".
    pub fn resolve(provider: &dyn ConfigProvider) -> Self {
        let ttl_seconds = read_number(provider, Self::TTL_SETTING)
            .map(|v| clamp(v, Self::MIN_TTL_SECONDS, Self::MAX_TTL_SECONDS))
            .unwrap_or(Self::DEFAULT_TTL_SECONDS);

        let max_entries = read_number(provider, Self::MAX_ENTRIES_SETTING)
            .map(|v| {
                clamp(
                    v,
                    Self::MIN_MAX_ENTRIES as u64,
                    Self::MAX_MAX_ENTRIES as u64,
                ) as usize
            })
            .unwrap_or(Self::DEFAULT_MAX_ENTRIES);

        Self {
            ttl_seconds,
            max_entries,
        }
    }

    /// TTL in milliseconds, for comparison against stored timestamps.
    pub fn ttl_ms(&self) -> i64 {
        (self.ttl_seconds * 1000) as i64
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: Self::DEFAULT_TTL_SECONDS,
            max_entries: Self::DEFAULT_MAX_ENTRIES,
        }
    }
}

fn read_number(provider: &dyn ConfigProvider, name: &str) -> Option<f64> {
    let value = match provider.setting(name) {
        Ok(value) => value?,
        Err(e) => {
            tracing::warn!("Failed to read setting '{}', using default: {:#}", name, e);
            return None;
        }
    };

    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        _ => None,
    }
}

fn clamp(value: f64, min: u64, max: u64) -> u64 {
    let value = value.trunc();
    if value <= min as f64 {
        min
    } else if value >= max as f64 {
        max
    } else {
        value as u64
    }
}

//! Decoding and display helpers for stored cache records.

use chrono::Duration;
use serde_json::Value;

use super::entry::{AccessTimes, CacheEntry};

/// Decode a stored entry, rejecting unknown layouts.
pub fn decode_entry(value: Value) -> Result<CacheEntry, String> {
    let entry: CacheEntry = serde_json::from_value(value).map_err(|e| e.to_string())?;

    if entry.version != CacheEntry::CURRENT_VERSION {
        return Err(format!(
            "unsupported entry version {} (expected {})",
            entry.version,
            CacheEntry::CURRENT_VERSION
        ));
    }

    Ok(entry)
}

/// Decode the access-time table. A malformed table reads as empty.
pub fn decode_access_times(value: Option<Value>) -> AccessTimes {
    match value {
        None => AccessTimes::new(),
        Some(value) => serde_json::from_value(value).unwrap_or_else(|e| {
            tracing::warn!("Discarding malformed cache access-time table: {}", e);
            AccessTimes::new()
        }),
    }
}

/// Format a duration for display.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.num_seconds();

    if secs >= 3600 {
        let hours = secs / 3600;
        let mins = (secs % 3600) / 60;
        if mins > 0 {
            format!("{}h {}m", hours, mins)
        } else {
            format!("{}h", hours)
        }
    } else if secs >= 60 {
        let mins = secs / 60;
        format!("{}m", mins)
    } else {
        format!("{}s", secs)
    }
}

//! Durable key-value storage.
//!
//! The cache persists its entries and bookkeeping through a
//! [`KeyValueStore`]. Two implementations are provided:
//! - [`MemoryStore`] keeps everything in process memory
//! - [`FileStore`] keeps a single JSON document on disk
//!
//! Stores are shared: the cache only touches keys under its own prefix,
//! so other state can live in the same namespace.

pub mod memory;
pub mod store;

pub use memory::MemoryStore;
pub use store::FileStore;

use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Default state file location for a project root.
pub fn default_state_path(project_root: &Path) -> PathBuf {
    project_root.join(".steering").join("state.json")
}

/// Durable string-keyed store of JSON values.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Write `value` under `key`; `None` deletes the key.
    fn update(&self, key: &str, value: Option<Value>) -> Result<()>;

    /// All keys currently stored.
    fn keys(&self) -> Result<Vec<String>>;
}

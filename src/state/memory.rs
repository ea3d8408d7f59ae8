//! In-memory key-value store.

use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Mutex;

use super::KeyValueStore;
use crate::error::Result;

/// Key-value store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<BTreeMap<String, Value>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.values.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Whether the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        let values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        Ok(values.get(key).cloned())
    }

    fn update(&self, key: &str, value: Option<Value>) -> Result<()> {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        match value {
            Some(value) => {
                values.insert(key.to_string(), value);
            }
            None => {
                values.remove(key);
            }
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        Ok(values.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_store_is_empty() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        assert!(store.keys().unwrap().is_empty());
    }

    #[test]
    fn update_and_get() {
        let store = MemoryStore::new();
        store.update("a", Some(json!({"n": 1}))).unwrap();

        assert_eq!(store.get("a").unwrap(), Some(json!({"n": 1})));
        assert_eq!(store.get("b").unwrap(), None);
    }

    #[test]
    fn update_with_none_deletes() {
        let store = MemoryStore::new();
        store.update("a", Some(json!(1))).unwrap();
        store.update("a", None).unwrap();

        assert!(store.get("a").unwrap().is_none());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn deleting_missing_key_is_noop() {
        let store = MemoryStore::new();
        store.update("missing", None).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn keys_are_sorted() {
        let store = MemoryStore::new();
        store.update("b", Some(json!(2))).unwrap();
        store.update("a", Some(json!(1))).unwrap();

        assert_eq!(store.keys().unwrap(), vec!["a", "b"]);
    }
}

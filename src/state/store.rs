//! File-backed key-value store.
//!
//! The whole namespace is one JSON object on disk. Every operation reads
//! the file, so several processes sharing the file see each other's
//! writes (last writer wins).

use serde_json::{Map, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::KeyValueStore;
use crate::error::{Result, TemplateError};

/// Key-value store persisted as a JSON document.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Create a store backed by `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Map<String, Value>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        serde_json::from_str(&content).map_err(|e| TemplateError::CacheCorrupted {
            key: self.path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Save the document using atomic write.
    ///
    /// Writes to a temp file next to the target, then renames it into place.
    fn save(&self, values: &Map<String, Value>) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir).map_err(|e| self.write_error(e))?;
            }
        }

        let content = serde_json::to_string_pretty(values)
            .map_err(|e| TemplateError::Other(anyhow::anyhow!("Failed to serialize state: {}", e)))?;

        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, &content).map_err(|e| self.write_error(e))?;
        fs::rename(&temp_path, &self.path).map_err(|e| self.write_error(e))?;

        Ok(())
    }

    fn write_error(&self, err: std::io::Error) -> TemplateError {
        if err.kind() == ErrorKind::StorageFull {
            TemplateError::CacheQuotaExceeded {
                message: format!("{}: {}", self.path.display(), err),
            }
        } else {
            TemplateError::Io(err)
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.load()?.remove(key))
    }

    fn update(&self, key: &str, value: Option<Value>) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut values = self.load()?;

        let changed = match value {
            Some(value) => {
                values.insert(key.to_string(), value);
                true
            }
            None => values.remove(key).is_some(),
        };

        if changed {
            self.save(&values)?;
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.load()?.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn missing_file_reads_as_empty() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path().join("state.json"));

        assert!(store.get("anything").unwrap().is_none());
        assert!(store.keys().unwrap().is_empty());
    }

    #[test]
    fn update_persists_to_disk() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("state.json");
        let store = FileStore::new(&path);

        store.update("k", Some(json!({"v": [1, 2]}))).unwrap();

        assert!(path.exists());
        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get("k").unwrap(), Some(json!({"v": [1, 2]})));
    }

    #[test]
    fn delete_removes_key() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path().join("state.json"));

        store.update("a", Some(json!(1))).unwrap();
        store.update("b", Some(json!(2))).unwrap();
        store.update("a", None).unwrap();

        assert_eq!(store.keys().unwrap(), vec!["b"]);
    }

    #[test]
    fn deleting_missing_key_does_not_create_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("state.json");
        let store = FileStore::new(&path);

        store.update("missing", None).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn no_temp_file_left_behind() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("state.json");
        let store = FileStore::new(&path);

        store.update("a", Some(json!(true))).unwrap();
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn malformed_file_is_reported_as_corrupted() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("state.json");
        fs::write(&path, "{ not json").unwrap();
        let store = FileStore::new(&path);

        let err = store.get("a").unwrap_err();
        assert!(matches!(err, TemplateError::CacheCorrupted { .. }));
    }

    #[test]
    fn empty_file_reads_as_empty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("state.json");
        fs::write(&path, "").unwrap();
        let store = FileStore::new(&path);

        assert!(store.keys().unwrap().is_empty());
    }
}

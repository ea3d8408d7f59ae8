//! Settings providers.
//!
//! [`YamlSettings`] reads `.steering/config.yml` (or any YAML file) on
//! every lookup. [`StaticSettings`] holds values in memory and is handy
//! for tests and embedding.

use anyhow::{Context, Result};
use serde_yaml::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Source of named settings.
///
/// Implementations may fail (unreadable file, malformed YAML); callers
/// decide whether a failure is fatal or falls back to defaults.
pub trait ConfigProvider: Send + Sync {
    /// Look up a setting by dotted name. `Ok(None)` means "not set".
    fn setting(&self, name: &str) -> Result<Option<Value>>;
}

/// Default settings file location for a project root.
pub fn default_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".steering").join("config.yml")
}

/// Settings read from a YAML file.
///
/// Dotted names walk nested mappings, so `cache.ttl` reads
///
/// ```yaml
/// cache:
///   ttl: 600
/// ```
#[derive(Debug, Clone)]
pub struct YamlSettings {
    path: PathBuf,
}

impl YamlSettings {
    /// Create a provider for the given file. The file need not exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the settings file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Option<Value>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings file {:?}", self.path))?;

        if content.trim().is_empty() {
            return Ok(None);
        }

        let value = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse settings file {:?}", self.path))?;
        Ok(Some(value))
    }
}

impl ConfigProvider for YamlSettings {
    fn setting(&self, name: &str) -> Result<Option<Value>> {
        let Some(root) = self.load()? else {
            return Ok(None);
        };
        Ok(lookup(&root, name).cloned())
    }
}

fn lookup<'a>(root: &'a Value, name: &str) -> Option<&'a Value> {
    name.split('.').try_fold(root, |node, segment| match node {
        Value::Mapping(map) => map.get(segment),
        _ => None,
    })
}

/// In-memory settings.
#[derive(Debug, Clone, Default)]
pub struct StaticSettings {
    values: HashMap<String, Value>,
}

impl StaticSettings {
    /// Create an empty settings map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Insert or replace a setting.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) {
        self.values.insert(name.to_string(), value.into());
    }
}

impl ConfigProvider for StaticSettings {
    fn setting(&self, name: &str) -> Result<Option<Value>> {
        Ok(self.values.get(name).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_path_is_under_steering_dir() {
        let path = default_config_path(Path::new("/work"));
        assert_eq!(path, PathBuf::from("/work/.steering/config.yml"));
    }

    #[test]
    fn missing_file_yields_none() {
        let temp = TempDir::new().unwrap();
        let settings = YamlSettings::new(temp.path().join("config.yml"));

        assert!(settings.setting("cache.ttl").unwrap().is_none());
    }

    #[test]
    fn reads_nested_values() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        fs::write(
            &path,
            "cache:\n  ttl: 600\n  max_entries: 50\ngithub:\n  token: abc\n",
        )
        .unwrap();

        let settings = YamlSettings::new(&path);
        assert_eq!(settings.setting("cache.ttl").unwrap(), Some(Value::from(600)));
        assert_eq!(
            settings.setting("github.token").unwrap(),
            Some(Value::from("abc"))
        );
        assert!(settings.setting("cache.missing").unwrap().is_none());
        assert!(settings.setting("github.token.deeper").unwrap().is_none());
    }

    #[test]
    fn rereads_file_on_each_lookup() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        fs::write(&path, "cache:\n  ttl: 100\n").unwrap();
        let settings = YamlSettings::new(&path);

        assert_eq!(settings.setting("cache.ttl").unwrap(), Some(Value::from(100)));

        fs::write(&path, "cache:\n  ttl: 200\n").unwrap();
        assert_eq!(settings.setting("cache.ttl").unwrap(), Some(Value::from(200)));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        fs::write(&path, "cache: [unclosed").unwrap();

        let settings = YamlSettings::new(&path);
        assert!(settings.setting("cache.ttl").is_err());
    }

    #[test]
    fn static_settings_round_trip() {
        let mut settings = StaticSettings::new().with("github.api_url", "http://localhost");
        settings.set("cache.ttl", 90);

        assert_eq!(
            settings.setting("github.api_url").unwrap(),
            Some(Value::from("http://localhost"))
        );
        assert_eq!(settings.setting("cache.ttl").unwrap(), Some(Value::from(90)));
    }
}

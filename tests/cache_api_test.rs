//! Integration tests for the cache over on-disk settings and state.

use chrono::{Duration, TimeZone, Utc};
use serde_json::json;
use std::fs;
use std::sync::Arc;
use steering_templates::cache::{CacheStore, CACHE_PREFIX};
use steering_templates::clock::ManualClock;
use steering_templates::config::{CacheConfig, YamlSettings};
use steering_templates::registry::{TemplateKind, TemplateMetadata};
use steering_templates::state::{FileStore, KeyValueStore};
use steering_templates::TemplateError;
use tempfile::TempDir;

fn template(name: &str) -> TemplateMetadata {
    TemplateMetadata {
        name: name.to_string(),
        filename: format!("{}.md", name),
        path: format!("steering/{}.md", name),
        content_hash: format!("sha-{}", name),
        size_bytes: 42,
        download_url: format!("https://raw.example/{}.md", name),
        kind: TemplateKind::File,
    }
}

struct Project {
    temp: TempDir,
    clock: ManualClock,
}

impl Project {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join(".steering")).unwrap();
        Self {
            temp,
            clock: ManualClock::new(Utc.timestamp_opt(1_700_000_000, 0).unwrap()),
        }
    }

    fn write_config(&self, yaml: &str) {
        fs::write(self.config_path(), yaml).unwrap();
    }

    fn config_path(&self) -> std::path::PathBuf {
        self.temp.path().join(".steering/config.yml")
    }

    fn state_path(&self) -> std::path::PathBuf {
        self.temp.path().join(".steering/state.json")
    }

    fn store(&self) -> Arc<FileStore> {
        Arc::new(FileStore::new(self.state_path()))
    }

    fn cache(&self) -> CacheStore {
        CacheStore::new(self.store(), Arc::new(YamlSettings::new(self.config_path())))
            .with_clock(Arc::new(self.clock.clone()))
    }
}

#[test]
fn entries_survive_a_new_cache_instance() {
    let project = Project::new();
    let templates = vec![template("api"), template("testing")];

    project.cache().put("octo/rules/", templates.clone(), "tree-1").unwrap();

    let reopened = project.cache();
    assert_eq!(reopened.get("octo/rules/").unwrap(), Some(templates));
    assert!(reopened.is_valid("octo/rules/", "tree-1").unwrap());
}

#[test]
fn settings_file_changes_apply_immediately() {
    let project = Project::new();
    project.write_config("cache:\n  ttl: 60\n");
    let cache = project.cache();

    cache.put("k", vec![template("a")], "").unwrap();
    project.clock.advance(Duration::seconds(120));
    assert!(!cache.is_fresh("k").unwrap());

    project.write_config("cache:\n  ttl: 3600\n  max_entries: 20\n");
    assert!(cache.is_fresh("k").unwrap());
    assert_eq!(
        cache.config(),
        CacheConfig {
            ttl_seconds: 3600,
            max_entries: 20
        }
    );
}

#[test]
fn malformed_settings_fall_back_to_defaults() {
    let project = Project::new();
    project.write_config("cache: [unterminated\n");

    assert_eq!(project.cache().config(), CacheConfig::default());
}

#[test]
fn out_of_range_settings_are_clamped() {
    let project = Project::new();
    project.write_config("cache:\n  ttl: 5\n  max_entries: 100000\n");

    let config = project.cache().config();
    assert_eq!(config.ttl_seconds, 60);
    assert_eq!(config.max_entries, 1000);
}

#[test]
fn clear_all_keeps_unrelated_state() {
    let project = Project::new();
    let store = project.store();
    store
        .update("steering.preferences.dest", Some(json!(".steering/templates")))
        .unwrap();

    let cache = project.cache();
    cache.put("a", vec![], "").unwrap();
    cache.put("b", vec![], "").unwrap();
    assert_eq!(cache.clear_all().unwrap(), 2);

    let keys = store.keys().unwrap();
    assert_eq!(keys, vec!["steering.preferences.dest"]);
    assert!(keys.iter().all(|k| !k.starts_with(CACHE_PREFIX)));
}

#[test]
fn lru_eviction_on_disk() {
    let project = Project::new();
    project.write_config("cache:\n  max_entries: 10\n");
    let cache = project.cache();

    for i in 0..10 {
        cache.put(&format!("k{}", i), vec![], "").unwrap();
        project.clock.advance(Duration::seconds(1));
    }
    cache.get("k0").unwrap();
    cache.put("k10", vec![], "").unwrap();

    let keys = project.cache().keys().unwrap();
    assert_eq!(keys.len(), 10);
    assert!(keys.contains(&"k0".to_string()));
    assert!(!keys.contains(&"k1".to_string()));
}

#[test]
fn corrupted_state_file_propagates() {
    let project = Project::new();
    fs::write(project.state_path(), "{ not json").unwrap();

    let cache = project.cache();
    assert!(matches!(
        cache.get("k"),
        Err(TemplateError::CacheCorrupted { .. })
    ));
    assert!(cache.stats().is_err());
}

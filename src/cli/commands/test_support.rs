//! Fixtures shared by command tests.

use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

use crate::cache::CacheStore;
use crate::config::StaticSettings;
use crate::registry::fetch::{MockTransport, RetryPolicy};
use crate::registry::{GithubClient, TemplateCatalog};
use crate::state::MemoryStore;

pub fn catalog(transport: &Arc<MockTransport>) -> TemplateCatalog {
    let client = GithubClient::new(transport.clone()).with_retry_policy(RetryPolicy {
        base_delay: Duration::from_millis(1),
        ..RetryPolicy::default()
    });
    let cache = CacheStore::new(Arc::new(MemoryStore::new()), Arc::new(StaticSettings::new()));
    TemplateCatalog::new(client, cache)
}

pub fn listing() -> Value {
    json!([
        {
            "name": "testing.md",
            "path": "steering/testing.md",
            "sha": "t1",
            "size": 10,
            "type": "file",
            "download_url": "https://raw.example/testing.md"
        },
        {
            "name": "api.md",
            "path": "steering/api.md",
            "sha": "a1",
            "size": 2048,
            "type": "file",
            "download_url": "https://raw.example/api.md"
        },
        {
            "name": "notes.txt",
            "path": "steering/notes.txt",
            "sha": "n1",
            "size": 5,
            "type": "file",
            "download_url": "https://raw.example/notes.txt"
        }
    ])
}

//! Remote steering templates.
//!
//! This module discovers markdown templates in GitHub repositories:
//! - [`GithubClient`] talks to the contents API, with retry and typed errors
//! - [`TemplateCatalog`] serves listings through the [`CacheStore`]
//! - [`template`] holds the metadata model and listing filters
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use steering_templates::cache::CacheStore;
//! use steering_templates::config::StaticSettings;
//! use steering_templates::registry::fetch::MockTransport;
//! use steering_templates::registry::{GithubClient, TemplateCatalog};
//! use steering_templates::state::MemoryStore;
//!
//! let transport = Arc::new(MockTransport::new());
//! transport.push_json(serde_json::json!([{
//!     "name": "testing.md",
//!     "path": "testing.md",
//!     "sha": "abc123",
//!     "size": 42,
//!     "type": "file",
//!     "download_url": "https://raw.githubusercontent.com/octo/rules/main/testing.md"
//! }]));
//!
//! let cache = CacheStore::new(Arc::new(MemoryStore::new()), Arc::new(StaticSettings::new()));
//! let catalog = TemplateCatalog::new(GithubClient::new(transport.clone()), cache);
//!
//! let templates = catalog.list("octo", "rules", None, None).unwrap();
//! assert_eq!(templates[0].name, "testing");
//!
//! // Served from the cache the second time.
//! catalog.list("octo", "rules", None, None).unwrap();
//! assert_eq!(transport.request_count(), 1);
//! ```
//!
//! [`CacheStore`]: crate::cache::CacheStore

pub mod fetch;
pub mod github;
pub mod remote;
pub mod template;

pub use github::{
    GithubClient, RateLimitStatus, RepositoryCheck, ANONYMOUS_RATE_LIMIT, AUTHENTICATED_RATE_LIMIT,
};
pub use remote::{cache_key, TemplateCatalog};
pub use template::{
    collect_templates, display_name, is_template_filename, sort_by_name, ContentEntry, EntryType,
    TemplateKind, TemplateMetadata, TEMPLATE_EXTENSION,
};

//! Configuration for steering templates.
//!
//! This module handles all aspects of configuration:
//! - The [`ConfigProvider`] contract and its implementations in [`loader`]
//! - Cache settings resolution and clamping in [`cache`]
//! - GitHub connection settings in [`github`]
//!
//! Settings are addressed by dotted names (`cache.ttl`,
//! `cache.max_entries`, `github.token`, `github.api_url`) and are read
//! fresh on every use.
//!
//! # Example
//!
//! ```
//! use steering_templates::config::{CacheConfig, StaticSettings};
//!
//! let settings = StaticSettings::new()
//!     .with("cache.ttl", 30)
//!     .with("cache.max_entries", 250);
//!
//! let config = CacheConfig::resolve(&settings);
//! assert_eq!(config.ttl_seconds, 60); // clamped to the minimum
//! assert_eq!(config.max_entries, 250);
//! ```

pub mod cache;
pub mod github;
pub mod loader;

pub use cache::CacheConfig;
pub use github::GithubSettings;
pub use loader::{default_config_path, ConfigProvider, StaticSettings, YamlSettings};

//! Steering templates - browse and install markdown templates from GitHub.
//!
//! Steering templates are markdown files kept in a GitHub repository
//! directory. This crate lists them through the GitHub contents API,
//! caches the listings locally with a TTL and an LRU bound, and writes
//! chosen templates into a project.
//!
//! # Modules
//!
//! - [`cache`] - TTL- and LRU-bounded listing cache
//! - [`cli`] - Command-line interface and argument parsing
//! - [`clock`] - Injectable wall-clock sources
//! - [`config`] - Settings providers and resolution
//! - [`error`] - Error types and result aliases
//! - [`registry`] - GitHub client, retry, and the cached catalog
//! - [`state`] - Durable key-value stores
//! - [`ui`] - Terminal output and prompts
//! - [`workspace`] - Writing templates into a project
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use steering_templates::cache::CacheStore;
//! use steering_templates::config::StaticSettings;
//! use steering_templates::state::MemoryStore;
//!
//! let cache = CacheStore::new(Arc::new(MemoryStore::new()), Arc::new(StaticSettings::new()));
//! cache.put("octo/rules/", Vec::new(), "").unwrap();
//!
//! assert!(cache.is_fresh("octo/rules/").unwrap());
//! assert_eq!(cache.stats().unwrap().total_entries, 1);
//! ```

pub mod cache;
pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod registry;
pub mod state;
pub mod ui;
pub mod workspace;

pub use error::{Result, TemplateError};

//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which opens the
//! settings, cache and client once and routes CLI subcommands to their
//! implementations. Commands only see the resulting
//! [`TemplateCatalog`](crate::registry::TemplateCatalog), so tests can run
//! them against a scripted transport.

pub mod cache;
pub mod dispatcher;
pub mod display;
pub mod install;
pub mod list;
pub mod repo;
pub mod show;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};

#[cfg(test)]
pub(crate) mod test_support;

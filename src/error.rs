//! Error types for steering template operations.
//!
//! This module defines [`TemplateError`], the shared error taxonomy used by
//! the remote client, the cache, and the workspace writer, and a [`Result`]
//! type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Remote failures are classified into typed variants before they leave
//!   the [`crate::registry::GithubClient`] public operations
//! - Durable-store failures propagate unchanged through the cache
//! - Use `anyhow::Error` (via `TemplateError::Other`) for unexpected errors
//! - Every variant carries enough detail (status, reset time, path) for the
//!   presentation layer to act on it

use chrono::{DateTime, Utc};
use std::path::PathBuf;
use thiserror::Error;

/// Core error type for steering template operations.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Generic transport failure or unexpected response shape.
    #[error("Network error: {message}")]
    Network {
        message: String,
        status: Option<u16>,
    },

    /// A request was aborted because it exceeded its timeout.
    #[error("Request timed out: {message}")]
    Timeout { message: String },

    /// The repository or path does not exist (HTTP 404).
    #[error("Repository not found: {resource}")]
    RepositoryNotFound { resource: String },

    /// Credentials were rejected (HTTP 401).
    #[error("Authentication failed: the GitHub token is invalid or expired")]
    Unauthorized,

    /// Access denied for a reason other than rate limiting (HTTP 403).
    #[error("Access forbidden: {resource}")]
    Forbidden { resource: String },

    /// The API rate limit is exhausted until `reset_at`.
    #[error("GitHub API rate limit exceeded, resets at {reset_at}")]
    RateLimitExceeded { reset_at: DateTime<Utc> },

    /// A configured path resolved to a single file that is not markdown.
    #[error("Invalid configuration: '{path}' points to '{filename}', which is not a markdown file")]
    InvalidConfiguration { path: String, filename: String },

    /// Writing into the destination was refused by the OS.
    #[error("Permission denied: {}", path.display())]
    PermissionDenied { path: PathBuf },

    /// The destination volume has no space left.
    #[error("Disk full while writing {}", path.display())]
    DiskFull { path: PathBuf },

    /// The destination file exists and overwriting was declined.
    #[error("File already exists: {}", path.display())]
    FileExists { path: PathBuf },

    /// A stored cache record could not be decoded.
    #[error("Cache entry '{key}' is corrupted: {message}")]
    CacheCorrupted { key: String, message: String },

    /// The durable store refused a write because it is out of space.
    #[error("Cache storage quota exceeded: {message}")]
    CacheQuotaExceeded { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Suggested follow-up a user can take after an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryAction {
    /// Set or replace the GitHub token.
    ConfigureToken,
    /// Drop cached listings and fetch again.
    ClearCache,
    /// Try the same operation again later.
    Retry,
    /// Double-check the owner, repository, and path settings.
    CheckRepository,
}

impl RecoveryAction {
    /// Short label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Self::ConfigureToken => "Configure a GitHub token",
            Self::ClearCache => "Clear the template cache",
            Self::Retry => "Retry",
            Self::CheckRepository => "Check the repository settings",
        }
    }
}

impl TemplateError {
    /// HTTP status associated with this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Network { status, .. } => *status,
            Self::RepositoryNotFound { .. } => Some(404),
            Self::Unauthorized => Some(401),
            Self::Forbidden { .. } | Self::RateLimitExceeded { .. } => Some(403),
            _ => None,
        }
    }

    /// Human-readable message for the presentation layer.
    pub fn user_message(&self) -> String {
        match self {
            Self::Network { .. } => {
                "Could not reach GitHub. Check your network connection.".to_string()
            }
            Self::Timeout { .. } => "GitHub did not respond in time.".to_string(),
            Self::RepositoryNotFound { resource } => {
                format!("Repository or path '{}' was not found.", resource)
            }
            Self::Unauthorized => "The configured GitHub token was rejected.".to_string(),
            Self::Forbidden { resource } => format!("Access to '{}' is forbidden.", resource),
            Self::RateLimitExceeded { reset_at } => format!(
                "GitHub rate limit reached. Try again after {}.",
                reset_at.format("%H:%M:%S UTC")
            ),
            Self::InvalidConfiguration { path, .. } => format!(
                "The configured path '{}' is a file, but not a markdown file.",
                path
            ),
            Self::CacheCorrupted { .. } => {
                "A cached listing could not be read and was discarded.".to_string()
            }
            other => other.to_string(),
        }
    }

    /// Suggested recovery actions, most relevant first.
    pub fn recovery_actions(&self) -> Vec<RecoveryAction> {
        match self {
            Self::Network { .. } | Self::Timeout { .. } => vec![RecoveryAction::Retry],
            Self::RepositoryNotFound { .. } | Self::InvalidConfiguration { .. } => {
                vec![RecoveryAction::CheckRepository]
            }
            Self::Unauthorized | Self::Forbidden { .. } => vec![RecoveryAction::ConfigureToken],
            Self::RateLimitExceeded { .. } => {
                vec![RecoveryAction::ConfigureToken, RecoveryAction::Retry]
            }
            Self::CacheCorrupted { .. } | Self::CacheQuotaExceeded { .. } => {
                vec![RecoveryAction::ClearCache]
            }
            _ => Vec::new(),
        }
    }
}

/// Result type alias for steering template operations.
pub type Result<T> = std::result::Result<T, TemplateError>;

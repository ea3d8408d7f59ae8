//! Cached template catalog.
//!
//! Sits between callers and the [`GithubClient`]: listings are served from
//! the [`CacheStore`] while fresh and fetched (then stored) otherwise.

use super::github::GithubClient;
use super::template::TemplateMetadata;
use crate::cache::CacheStore;
use crate::error::{Result, TemplateError};

/// Cache key for a repository directory.
///
/// The branch is not part of the key, so listings of the same directory on
/// different branches share one entry. Leading and trailing slashes on
/// `path` are ignored, matching how the contents URL is built.
pub fn cache_key(owner: &str, repo: &str, path: Option<&str>) -> String {
    let path = path.map(|p| p.trim_matches('/')).unwrap_or_default();
    format!("{}/{}/{}", owner, repo, path)
}

/// Templates available from remote repositories, with caching.
pub struct TemplateCatalog {
    client: GithubClient,
    cache: CacheStore,
}

impl TemplateCatalog {
    /// Create a catalog over a client and a cache.
    pub fn new(client: GithubClient, cache: CacheStore) -> Self {
        Self { client, cache }
    }

    /// The underlying client.
    pub fn client(&self) -> &GithubClient {
        &self.client
    }

    /// The underlying cache.
    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    /// List templates at `path` in `owner/repo`.
    ///
    /// A fresh cached listing is returned without touching the network.
    /// Otherwise the listing is fetched and cached. Fetch failures are
    /// returned as-is and leave the cache unchanged.
    pub fn list(
        &self,
        owner: &str,
        repo: &str,
        path: Option<&str>,
        branch: Option<&str>,
    ) -> Result<Vec<TemplateMetadata>> {
        let key = cache_key(owner, repo, path);

        match self.cache.get(&key) {
            Ok(Some(templates)) => return Ok(templates),
            Ok(None) => {}
            Err(TemplateError::CacheCorrupted { message, .. }) => {
                tracing::warn!("Ignoring corrupted cache entry for '{}': {}", key, message);
            }
            Err(e) => return Err(e),
        }

        let templates = self.client.fetch_templates(owner, repo, path, branch)?;
        self.cache.put(&key, templates.clone(), "")?;
        Ok(templates)
    }

    /// Drop any cached listing for `path` and fetch it again.
    pub fn refresh(
        &self,
        owner: &str,
        repo: &str,
        path: Option<&str>,
        branch: Option<&str>,
    ) -> Result<Vec<TemplateMetadata>> {
        self.cache.invalidate(&cache_key(owner, repo, path))?;
        self.list(owner, repo, path, branch)
    }

    /// Find a template by display name or file name.
    pub fn find(
        &self,
        owner: &str,
        repo: &str,
        path: Option<&str>,
        branch: Option<&str>,
        name: &str,
    ) -> Result<Option<TemplateMetadata>> {
        Ok(self
            .list(owner, repo, path, branch)?
            .into_iter()
            .find(|t| t.name == name || t.filename == name))
    }

    /// Download the raw content of a template. Content is never cached.
    pub fn download(&self, template: &TemplateMetadata) -> Result<String> {
        tracing::debug!("Downloading template '{}'", template.name);
        self.client.fetch_file_content(&template.download_url)
    }
}

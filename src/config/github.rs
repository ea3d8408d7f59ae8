//! GitHub connection settings.

use anyhow::Result;
use serde_yaml::Value;

use super::ConfigProvider;

/// Public GitHub REST API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Where and how to reach the GitHub API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubSettings {
    /// Base URL of the REST API.
    pub api_url: String,
    /// Bearer token, if configured.
    pub token: Option<String>,
}

impl GithubSettings {
    pub const TOKEN_SETTING: &'static str = "github.token";
    pub const API_URL_SETTING: &'static str = "github.api_url";

    /// Read settings from `provider`. Blank strings count as unset.
    pub fn resolve(provider: &dyn ConfigProvider) -> Result<Self> {
        let api_url = read_string(provider, Self::API_URL_SETTING)?
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let token = read_string(provider, Self::TOKEN_SETTING)?;

        Ok(Self { api_url, token })
    }

    /// Replace the token when `token` is given.
    pub fn with_token_override(mut self, token: Option<String>) -> Self {
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            self.token = Some(token);
        }
        self
    }

    /// Replace the API URL when `api_url` is given.
    pub fn with_api_url_override(mut self, api_url: Option<String>) -> Self {
        if let Some(url) = api_url {
            self.api_url = url;
        }
        self
    }
}

impl Default for GithubSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
        }
    }
}

fn read_string(provider: &dyn ConfigProvider, name: &str) -> Result<Option<String>> {
    Ok(match provider.setting(name)? {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    })
}

//! GitHub contents client.
//!
//! Lists markdown templates in a repository directory, downloads raw
//! content, checks that a repository exists, and reports the API rate
//! limit. Every failure leaving [`GithubClient::fetch_templates`] and
//! [`GithubClient::fetch_file_content`] is a typed [`TemplateError`];
//! [`GithubClient::validate_repository`] and
//! [`GithubClient::rate_limit_status`] never fail at all.

use chrono::{DateTime, TimeZone, Utc};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use super::fetch::{
    fetch_with_retry, FetchError, HttpRequest, HttpTransport, ReqwestTransport, RetryPolicy,
};
use super::template::{collect_templates, is_template_filename, ContentEntry, EntryType, TemplateMetadata};
use crate::config::GithubSettings;
use crate::error::{Result, TemplateError};

/// Hourly request budget for anonymous clients.
pub const ANONYMOUS_RATE_LIMIT: u32 = 60;
/// Hourly request budget for token-authenticated clients.
pub const AUTHENTICATED_RATE_LIMIT: u32 = 5000;

const ACCEPT_HEADER: &str = "application/vnd.github.v3+json";

/// Result of [`GithubClient::validate_repository`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryCheck {
    pub valid: bool,
    pub error: Option<String>,
    pub status_code: Option<u16>,
}

impl RepositoryCheck {
    fn ok() -> Self {
        Self {
            valid: true,
            error: None,
            status_code: None,
        }
    }
}

/// Current API rate-limit budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateLimitStatus {
    pub limit: u32,
    pub remaining: u32,
    pub reset_time: DateTime<Utc>,
    pub authenticated: bool,
}

#[derive(Debug, Deserialize)]
struct RateLimitResponse {
    resources: RateLimitResources,
}

#[derive(Debug, Deserialize)]
struct RateLimitResources {
    core: RateLimitWindow,
}

#[derive(Debug, Deserialize)]
struct RateLimitWindow {
    limit: u32,
    remaining: u32,
    reset: i64,
}

/// Client for the GitHub REST contents API.
pub struct GithubClient {
    transport: Arc<dyn HttpTransport>,
    api_url: String,
    token: Option<String>,
    policy: RetryPolicy,
}

impl GithubClient {
    /// Create a client for the public API over `transport`.
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            api_url: crate::config::github::DEFAULT_API_URL.to_string(),
            token: None,
            policy: RetryPolicy::default(),
        }
    }

    /// Create a `reqwest`-backed client from settings.
    pub fn from_settings(settings: &GithubSettings) -> Result<Self> {
        let mut client = Self::new(Arc::new(ReqwestTransport::new()?))
            .with_api_url(settings.api_url.clone());
        if let Some(token) = &settings.token {
            client.set_token(token.clone());
        }
        Ok(client)
    }

    /// Point the client at another API root (GitHub Enterprise, mock server).
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Replace the retry policy.
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Attach a bearer token to all following requests.
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Stop sending a bearer token.
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// Whether a token is configured.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// API root in use.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// List markdown templates at `path` in `owner/repo`.
    ///
    /// A path pointing at a single markdown file yields that one template;
    /// a path pointing at any other file is an `InvalidConfiguration` error.
    pub fn fetch_templates(
        &self,
        owner: &str,
        repo: &str,
        path: Option<&str>,
        branch: Option<&str>,
    ) -> Result<Vec<TemplateMetadata>> {
        let url = self.contents_url(owner, repo, path, branch)?;
        let resource = describe(owner, repo, path);

        let response = fetch_with_retry(
            self.transport.as_ref(),
            &self.request(url.as_str()),
            &resource,
            &self.policy,
        )?;

        let body: Value = response.json().map_err(|e| TemplateError::Network {
            message: format!("Invalid JSON listing for {}: {}", resource, e),
            status: Some(response.status),
        })?;

        let templates = match body {
            Value::Array(items) => collect_templates(decode_entries(items, path)),
            Value::Object(_) => {
                let entry: ContentEntry =
                    serde_json::from_value(body).map_err(|e| TemplateError::Network {
                        message: format!("Unexpected entry shape for {}: {}", resource, e),
                        status: Some(response.status),
                    })?;
                single_entry(entry.with_path_fallback(path), path)?
            }
            other => {
                return Err(TemplateError::Network {
                    message: format!(
                        "Unexpected response type for {}: {}",
                        resource,
                        json_type(&other)
                    ),
                    status: Some(response.status),
                })
            }
        };

        tracing::debug!("Fetched {} templates from {}", templates.len(), resource);
        Ok(templates)
    }

    /// Download raw content from an absolute URL.
    pub fn fetch_file_content(&self, url: &str) -> Result<String> {
        let response = fetch_with_retry(
            self.transport.as_ref(),
            &self.request(url),
            url,
            &self.policy,
        )?;
        Ok(response.body)
    }

    /// Check that `owner/repo` exists and is reachable.
    pub fn validate_repository(&self, owner: &str, repo: &str) -> RepositoryCheck {
        let url = match self.endpoint(&["repos", owner, repo]) {
            Ok(url) => url,
            Err(e) => {
                return RepositoryCheck {
                    valid: false,
                    error: Some(e.to_string()),
                    status_code: None,
                }
            }
        };

        match fetch_with_retry(
            self.transport.as_ref(),
            &self.request(url.as_str()),
            &describe(owner, repo, None),
            &self.policy,
        ) {
            Ok(_) => RepositoryCheck::ok(),
            Err(FetchError::Rejected(e)) => RepositoryCheck {
                valid: false,
                error: Some(e.user_message()),
                status_code: e.status_code(),
            },
            Err(FetchError::Transport(e)) => RepositoryCheck {
                valid: false,
                error: Some(e.to_string()),
                status_code: None,
            },
        }
    }

    /// Query the core rate-limit window once, without retrying.
    ///
    /// Any failure yields a conservative status with nothing remaining.
    pub fn rate_limit_status(&self) -> RateLimitStatus {
        match self.try_rate_limit_status() {
            Some(status) => status,
            None => RateLimitStatus {
                limit: self.baseline_limit(),
                remaining: 0,
                reset_time: Utc::now(),
                authenticated: self.is_authenticated(),
            },
        }
    }

    fn try_rate_limit_status(&self) -> Option<RateLimitStatus> {
        let url = self.endpoint(&["rate_limit"]).ok()?;
        let request = self.request(url.as_str());

        let response = match self.transport.get(&request) {
            Ok(response) if response.is_success() => response,
            Ok(response) => {
                tracing::debug!("Rate limit query returned HTTP {}", response.status);
                return None;
            }
            Err(e) => {
                tracing::debug!("Rate limit query failed: {}", e);
                return None;
            }
        };

        let parsed: RateLimitResponse = response.json().ok()?;
        let core = parsed.resources.core;
        Some(RateLimitStatus {
            limit: core.limit,
            remaining: core.remaining,
            reset_time: Utc.timestamp_opt(core.reset, 0).single()?,
            authenticated: self.is_authenticated(),
        })
    }

    fn baseline_limit(&self) -> u32 {
        if self.is_authenticated() {
            AUTHENTICATED_RATE_LIMIT
        } else {
            ANONYMOUS_RATE_LIMIT
        }
    }

    fn request(&self, url: &str) -> HttpRequest {
        let request = HttpRequest::get(url, self.policy.timeout).header("Accept", ACCEPT_HEADER);
        match &self.token {
            Some(token) => request.header("Authorization", format!("Bearer {}", token)),
            None => request,
        }
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.api_url).map_err(|e| {
            TemplateError::Other(anyhow::anyhow!("Invalid API URL '{}': {}", self.api_url, e))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                TemplateError::Other(anyhow::anyhow!(
                    "API URL '{}' cannot have a path",
                    self.api_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn contents_url(
        &self,
        owner: &str,
        repo: &str,
        path: Option<&str>,
        branch: Option<&str>,
    ) -> Result<Url> {
        let mut segments = vec!["repos", owner, repo, "contents"];
        if let Some(path) = path {
            segments.extend(path.split('/').filter(|s| !s.is_empty()));
        }

        let mut url = self.endpoint(&segments)?;
        if let Some(branch) = branch.filter(|b| !b.is_empty()) {
            url.query_pairs_mut().append_pair("ref", branch);
        }
        Ok(url)
    }
}

fn describe(owner: &str, repo: &str, path: Option<&str>) -> String {
    match path.map(|p| p.trim_matches('/')).filter(|p| !p.is_empty()) {
        Some(path) => format!("{}/{}/{}", owner, repo, path),
        None => format!("{}/{}", owner, repo),
    }
}

fn decode_entries(items: Vec<Value>, dir: Option<&str>) -> Vec<ContentEntry> {
    let dir = dir.map(|d| d.trim_matches('/')).filter(|d| !d.is_empty());
    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<ContentEntry>(item) {
            Ok(entry) => {
                let fallback = dir.map(|d| format!("{}/{}", d, entry.name));
                Some(entry.with_path_fallback(fallback.as_deref()))
            }
            Err(e) => {
                tracing::debug!("Skipping unrecognized listing entry: {}", e);
                None
            }
        })
        .collect()
}

/// Handle a listing that resolved to one object instead of an array.
fn single_entry(entry: ContentEntry, requested: Option<&str>) -> Result<Vec<TemplateMetadata>> {
    match entry.entry_type {
        EntryType::File if is_template_filename(&entry.name) => {
            Ok(entry.into_template().into_iter().collect())
        }
        EntryType::File => Err(TemplateError::InvalidConfiguration {
            path: requested
                .map(String::from)
                .unwrap_or_else(|| entry.path.clone()),
            filename: entry.name,
        }),
        EntryType::Dir | EntryType::Symlink | EntryType::Submodule => Ok(Vec::new()),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::fetch::{HttpResponse, MockTransport};
    use serde_json::json;
    use std::time::Duration;

    fn client(transport: &Arc<MockTransport>) -> GithubClient {
        GithubClient::new(transport.clone()).with_retry_policy(RetryPolicy {
            base_delay: Duration::from_millis(1),
            ..RetryPolicy::default()
        })
    }

    fn file(name: &str, url: Option<&str>) -> Value {
        json!({
            "name": name,
            "path": format!("steering/{}", name),
            "sha": format!("sha-{}", name),
            "size": 100,
            "type": "file",
            "download_url": url,
        })
    }

    #[test]
    fn builds_contents_url_without_ref() {
        let transport = Arc::new(MockTransport::new());
        transport.push_json(json!([]));

        client(&transport)
            .fetch_templates("octo", "rules", Some("steering"), None)
            .unwrap();

        let url = &transport.requests()[0].url;
        assert_eq!(url, "https://api.github.com/repos/octo/rules/contents/steering");
        assert!(!url.contains('?'));
    }

    #[test]
    fn builds_contents_url_with_ref_and_nested_path() {
        let transport = Arc::new(MockTransport::new());
        transport.push_json(json!([]));

        client(&transport)
            .fetch_templates("octo", "rules", Some("/docs/steering/"), Some("dev"))
            .unwrap();

        assert_eq!(
            transport.requests()[0].url,
            "https://api.github.com/repos/octo/rules/contents/docs/steering?ref=dev"
        );
    }

    #[test]
    fn empty_branch_adds_no_parameter() {
        let transport = Arc::new(MockTransport::new());
        transport.push_json(json!([]));

        client(&transport)
            .fetch_templates("o", "r", None, Some(""))
            .unwrap();

        assert_eq!(
            transport.requests()[0].url,
            "https://api.github.com/repos/o/r/contents"
        );
    }

    #[test]
    fn sends_accept_and_auth_headers() {
        let transport = Arc::new(MockTransport::new());
        transport.push_json(json!([]));
        transport.push_json(json!([]));

        let mut client = client(&transport);
        client.fetch_templates("o", "r", None, None).unwrap();
        client.set_token("t0ken");
        client.fetch_templates("o", "r", None, None).unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].header_value("accept"), Some(ACCEPT_HEADER));
        assert_eq!(requests[0].header_value("authorization"), None);
        assert_eq!(
            requests[1].header_value("authorization"),
            Some("Bearer t0ken")
        );
    }

    #[test]
    fn clear_token_removes_auth() {
        let transport = Arc::new(MockTransport::new());
        let mut client = client(&transport);
        client.set_token("x");
        assert!(client.is_authenticated());
        client.clear_token();
        assert!(!client.is_authenticated());
    }

    #[test]
    fn filters_and_sorts_listing() {
        let transport = Arc::new(MockTransport::new());
        transport.push_json(json!([
            file("testing.md", Some("https://raw/testing.md")),
            file("notes.txt", Some("https://raw/notes.txt")),
            {"name": "nested", "path": "steering/nested", "sha": "d", "size": 0,
             "type": "dir", "download_url": null},
            file("huge.md", None),
            file("api.md", Some("https://raw/api.md")),
        ]));

        let templates = client(&transport)
            .fetch_templates("o", "r", Some("steering"), None)
            .unwrap();

        let names: Vec<_> = templates.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["api", "testing"]);
        assert_eq!(templates[0].download_url, "https://raw/api.md");
    }

    #[test]
    fn unknown_entry_types_are_skipped() {
        let transport = Arc::new(MockTransport::new());
        transport.push_json(json!([
            {"name": "weird.md", "path": "weird.md", "type": "portal"},
            file("ok.md", Some("u")),
        ]));

        let templates = client(&transport)
            .fetch_templates("o", "r", None, None)
            .unwrap();
        assert_eq!(templates.len(), 1);
    }

    #[test]
    fn single_markdown_file_is_wrapped() {
        let transport = Arc::new(MockTransport::new());
        transport.push_json(json!({
            "name": "a.md", "path": "a.md", "sha": "s", "size": 3,
            "type": "file", "download_url": "u"
        }));

        let templates = client(&transport)
            .fetch_templates("o", "r", Some("a.md"), None)
            .unwrap();

        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].name, "a");
        assert_eq!(templates[0].filename, "a.md");
        assert_eq!(templates[0].download_url, "u");
    }

    #[test]
    fn single_non_markdown_file_is_invalid_configuration() {
        let transport = Arc::new(MockTransport::new());
        transport.push_json(json!({
            "name": "README.txt", "path": "docs/README.txt", "type": "file",
            "download_url": "u"
        }));

        let err = client(&transport)
            .fetch_templates("o", "r", Some("docs/README.txt"), None)
            .unwrap_err();

        match err {
            TemplateError::InvalidConfiguration { path, filename } => {
                assert_eq!(path, "docs/README.txt");
                assert_eq!(filename, "README.txt");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn minimal_single_markdown_object() {
        let transport = Arc::new(MockTransport::new());
        transport.push_json(json!({"name": "a.md", "type": "file", "download_url": "u"}));

        let templates = client(&transport)
            .fetch_templates("o", "r", Some("a.md"), None)
            .unwrap();

        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].name, "a");
        assert_eq!(templates[0].filename, "a.md");
        assert_eq!(templates[0].download_url, "u");
        assert_eq!(templates[0].path, "a.md");
        assert_eq!(templates[0].content_hash, "");
    }

    #[test]
    fn minimal_single_non_markdown_object() {
        let transport = Arc::new(MockTransport::new());
        transport.push_json(json!({"name": "README.txt", "type": "file"}));

        let err = client(&transport)
            .fetch_templates("o", "r", Some("README.txt"), None)
            .unwrap_err();

        match err {
            TemplateError::InvalidConfiguration { path, filename } => {
                assert_eq!(path, "README.txt");
                assert_eq!(filename, "README.txt");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn listing_items_without_path_are_kept() {
        let transport = Arc::new(MockTransport::new());
        transport.push_json(json!([
            {"name": "b.md", "type": "file", "download_url": "ub"},
            {"name": "notes.txt", "type": "file", "download_url": "un"},
            {"name": "a.md", "type": "file", "download_url": "ua"},
        ]));

        let templates = client(&transport)
            .fetch_templates("o", "r", Some("/steering/"), None)
            .unwrap();

        let paths: Vec<_> = templates.iter().map(|t| t.path.as_str()).collect();
        assert_eq!(paths, vec!["steering/a.md", "steering/b.md"]);
    }

    #[test]
    fn single_directory_object_is_empty() {
        let transport = Arc::new(MockTransport::new());
        transport.push_json(json!({
            "name": "steering", "path": "steering", "type": "dir", "download_url": null
        }));

        let templates = client(&transport)
            .fetch_templates("o", "r", Some("steering"), None)
            .unwrap();
        assert!(templates.is_empty());
    }

    #[test]
    fn scalar_response_is_network_error() {
        let transport = Arc::new(MockTransport::new());
        transport.push_json(json!("surprise"));

        let err = client(&transport)
            .fetch_templates("o", "r", None, None)
            .unwrap_err();
        match err {
            TemplateError::Network { message, .. } => assert!(message.contains("string")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn invalid_json_is_network_error() {
        let transport = Arc::new(MockTransport::new());
        transport.push_response(HttpResponse::new(200, "<html>"));

        let err = client(&transport)
            .fetch_templates("o", "r", None, None)
            .unwrap_err();
        assert!(matches!(err, TemplateError::Network { .. }));
    }

    #[test]
    fn not_found_is_classified() {
        let transport = Arc::new(MockTransport::new());
        transport.push_response(HttpResponse::new(404, "{}"));

        let err = client(&transport)
            .fetch_templates("o", "r", Some("missing"), None)
            .unwrap_err();
        match err {
            TemplateError::RepositoryNotFound { resource } => assert_eq!(resource, "o/r/missing"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn exhausted_timeouts_become_timeout_error() {
        let transport = Arc::new(MockTransport::new());
        for _ in 0..4 {
            transport.push_error(crate::registry::fetch::TransportError::Timeout {
                url: "u".into(),
            });
        }

        let err = client(&transport)
            .fetch_templates("o", "r", None, None)
            .unwrap_err();
        assert!(matches!(err, TemplateError::Timeout { .. }));
        assert_eq!(transport.request_count(), 4);
    }

    #[test]
    fn fetch_file_content_returns_body() {
        let transport = Arc::new(MockTransport::new());
        transport.push_connection_error("reset");
        transport.push_response(HttpResponse::new(200, "# Steering\n"));

        let content = client(&transport)
            .fetch_file_content("https://raw.example/a.md")
            .unwrap();
        assert_eq!(content, "# Steering\n");
        assert_eq!(transport.requests()[1].url, "https://raw.example/a.md");
    }

    #[test]
    fn validate_repository_success() {
        let transport = Arc::new(MockTransport::new());
        transport.push_json(json!({"full_name": "o/r"}));

        let check = client(&transport).validate_repository("o", "r");
        assert!(check.valid);
        assert_eq!(transport.requests()[0].url, "https://api.github.com/repos/o/r");
    }

    #[test]
    fn validate_repository_typed_failure() {
        let transport = Arc::new(MockTransport::new());
        transport.push_response(HttpResponse::new(404, "{}"));

        let check = client(&transport).validate_repository("o", "nope");
        assert!(!check.valid);
        assert_eq!(check.status_code, Some(404));
        assert!(check.error.unwrap().contains("o/nope"));
    }

    #[test]
    fn validate_repository_transport_failure() {
        let transport = Arc::new(MockTransport::new());
        for _ in 0..4 {
            transport.push_connection_error("dns failure");
        }

        let check = client(&transport).validate_repository("o", "r");
        assert!(!check.valid);
        assert_eq!(check.status_code, None);
        assert!(check.error.unwrap().contains("dns failure"));
    }

    #[test]
    fn rate_limit_status_parses_core_window() {
        let transport = Arc::new(MockTransport::new());
        transport.push_json(json!({
            "resources": {"core": {"limit": 5000, "remaining": 4990,
                                   "reset": 1700000000, "used": 10}}
        }));

        let mut client = client(&transport);
        client.set_token("t");
        let status = client.rate_limit_status();

        assert_eq!(status.limit, 5000);
        assert_eq!(status.remaining, 4990);
        assert_eq!(status.reset_time.timestamp(), 1_700_000_000);
        assert!(status.authenticated);
        assert_eq!(
            transport.requests()[0].url,
            "https://api.github.com/rate_limit"
        );
    }

    #[test]
    fn rate_limit_status_falls_back_without_retry() {
        let transport = Arc::new(MockTransport::new());
        transport.push_connection_error("offline");
        transport.push_json(json!({}));

        let status = client(&transport).rate_limit_status();
        assert_eq!(status.limit, ANONYMOUS_RATE_LIMIT);
        assert_eq!(status.remaining, 0);
        assert!(!status.authenticated);
        assert!((Utc::now() - status.reset_time).num_seconds().abs() < 5);
        assert_eq!(transport.request_count(), 1);
    }

    #[test]
    fn rate_limit_status_fallback_uses_authenticated_baseline() {
        let transport = Arc::new(MockTransport::new());
        transport.push_response(HttpResponse::new(500, ""));

        let mut client = client(&transport);
        client.set_token("t");
        let status = client.rate_limit_status();
        assert_eq!(status.limit, AUTHENTICATED_RATE_LIMIT);
        assert!(status.authenticated);
    }

    #[test]
    fn custom_api_url_is_used() {
        let transport = Arc::new(MockTransport::new());
        transport.push_json(json!([]));

        client(&transport)
            .with_api_url("https://ghe.example.com/api/v3/")
            .fetch_templates("o", "r", None, None)
            .unwrap();

        assert_eq!(
            transport.requests()[0].url,
            "https://ghe.example.com/api/v3/repos/o/r/contents"
        );
    }
}

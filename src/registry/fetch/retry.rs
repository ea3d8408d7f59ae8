//! Retry with exponential backoff and HTTP status classification.
//!
//! Failures come in two levels:
//! - [`TransportError`]: the request never produced a response. These are
//!   retried with exponential backoff.
//! - A response with a failing status. These are classified into a typed
//!   [`TemplateError`] immediately and never retried.
//!
//! [`FetchError`] keeps the two apart until the public client boundary,
//! where [`classify_transport`] turns an exhausted transport failure into
//! `Timeout` or `Network`.

use chrono::{DateTime, TimeZone, Utc};
use std::time::Duration;
use thiserror::Error;

use super::http::{HttpRequest, HttpResponse, HttpTransport, TransportError};
use crate::error::TemplateError;

/// Header carrying the number of requests left in the window.
pub const RATE_LIMIT_REMAINING_HEADER: &str = "x-ratelimit-remaining";
/// Header carrying the window reset time in Unix seconds.
pub const RATE_LIMIT_RESET_HEADER: &str = "x-ratelimit-reset";

/// How requests are retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry; doubles for each following retry.
    pub base_delay: Duration,
    /// Timeout applied to every attempt.
    pub timeout: Duration,
}

impl RetryPolicy {
    /// Delay before retry number `retry` (zero-based).
    pub fn delay_for(&self, retry: u32) -> Duration {
        self.base_delay.saturating_mul(2u32.saturating_pow(retry))
    }

    /// All backoff delays in order.
    pub fn delays(&self) -> Vec<Duration> {
        (0..self.max_retries).map(|n| self.delay_for(n)).collect()
    }

    /// Total attempts including the first.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries + 1
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Outcome of a failed [`fetch_with_retry`].
#[derive(Debug, Error)]
pub enum FetchError {
    /// Every attempt failed at the transport level; holds the last failure.
    #[error(transparent)]
    Transport(TransportError),

    /// A response arrived with a failing status.
    #[error(transparent)]
    Rejected(TemplateError),
}

impl From<FetchError> for TemplateError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Transport(e) => classify_transport(e),
            FetchError::Rejected(e) => e,
        }
    }
}

/// Turn an exhausted transport failure into a typed error.
pub fn classify_transport(err: TransportError) -> TemplateError {
    if err.is_timeout() {
        TemplateError::Timeout {
            message: err.to_string(),
        }
    } else {
        TemplateError::Network {
            message: err.to_string(),
            status: None,
        }
    }
}

/// Classify a failing response. Returns `None` for 2xx responses.
///
/// `resource` names what was requested and ends up in the error.
pub fn classify_status(response: &HttpResponse, resource: &str) -> Option<TemplateError> {
    if response.is_success() {
        return None;
    }

    Some(match response.status {
        401 => TemplateError::Unauthorized,
        404 => TemplateError::RepositoryNotFound {
            resource: resource.to_string(),
        },
        403 if response.header(RATE_LIMIT_REMAINING_HEADER).map(str::trim) == Some("0") => {
            TemplateError::RateLimitExceeded {
                reset_at: parse_reset(response.header(RATE_LIMIT_RESET_HEADER)),
            }
        }
        403 => TemplateError::Forbidden {
            resource: resource.to_string(),
        },
        status => {
            let message = if response.status_text.is_empty() {
                format!("HTTP {} fetching {}", status, resource)
            } else {
                format!(
                    "HTTP {} {} fetching {}",
                    status, response.status_text, resource
                )
            };
            TemplateError::Network {
                message,
                status: Some(status),
            }
        }
    })
}

/// Parse a Unix-seconds reset header, defaulting to now.
pub fn parse_reset(value: Option<&str>) -> DateTime<Utc> {
    value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
        .unwrap_or_else(Utc::now)
}

/// Send `request`, retrying transport failures per `policy`.
pub fn fetch_with_retry(
    transport: &dyn HttpTransport,
    request: &HttpRequest,
    resource: &str,
    policy: &RetryPolicy,
) -> Result<HttpResponse, FetchError> {
    fetch_with_backoff(transport, request, resource, policy, std::thread::sleep)
}

/// Like [`fetch_with_retry`], with the sleep between attempts supplied by
/// the caller.
pub fn fetch_with_backoff<S>(
    transport: &dyn HttpTransport,
    request: &HttpRequest,
    resource: &str,
    policy: &RetryPolicy,
    mut sleep: S,
) -> Result<HttpResponse, FetchError>
where
    S: FnMut(Duration),
{
    let mut request = request.clone();
    request.timeout = policy.timeout;

    let mut retry = 0;
    loop {
        match transport.get(&request) {
            Ok(response) => {
                return match classify_status(&response, resource) {
                    None => Ok(response),
                    Some(err) => {
                        tracing::debug!(
                            "Request to {} rejected with HTTP {}",
                            request.url,
                            response.status
                        );
                        Err(FetchError::Rejected(err))
                    }
                };
            }
            Err(err) if retry < policy.max_retries => {
                let delay = policy.delay_for(retry);
                tracing::debug!(
                    "Request to {} failed (attempt {}/{}): {}; retrying in {:?}",
                    request.url,
                    retry + 1,
                    policy.max_attempts(),
                    err,
                    delay
                );
                sleep(delay);
                retry += 1;
            }
            Err(err) => {
                tracing::debug!(
                    "Request to {} failed after {} attempts: {}",
                    request.url,
                    policy.max_attempts(),
                    err
                );
                return Err(FetchError::Transport(err));
            }
        }
    }
}

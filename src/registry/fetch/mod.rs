//! Fetching from the GitHub API.
//!
//! This module provides the HTTP transport abstraction and the retry and
//! classification layer shared by every remote operation.

pub mod http;
pub mod mock;
pub mod retry;

pub use http::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, TransportError};
pub use mock::MockTransport;
pub use retry::{
    classify_status, classify_transport, fetch_with_backoff, fetch_with_retry, FetchError,
    RetryPolicy,
};

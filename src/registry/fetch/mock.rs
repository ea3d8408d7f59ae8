//! Scripted transport for testing.
//!
//! `MockTransport` replays queued outcomes in order and records every
//! request it receives.
//!
//! # Example
//!
//! ```
//! use steering_templates::registry::fetch::{HttpRequest, HttpResponse, HttpTransport, MockTransport};
//! use std::time::Duration;
//!
//! let transport = MockTransport::new();
//! transport.push_response(HttpResponse::new(200, "[]"));
//!
//! let response = transport
//!     .get(&HttpRequest::get("https://api.github.com/x", Duration::from_secs(1)))
//!     .unwrap();
//! assert_eq!(response.body, "[]");
//! assert_eq!(transport.request_count(), 1);
//! ```

use std::collections::VecDeque;
use std::sync::Mutex;

use super::http::{HttpRequest, HttpResponse, HttpTransport, TransportError};

type Outcome = Result<HttpResponse, TransportError>;

/// Transport that replays scripted outcomes.
#[derive(Debug, Default)]
pub struct MockTransport {
    outcomes: Mutex<VecDeque<Outcome>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    /// Create a transport with nothing queued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response.
    pub fn push_response(&self, response: HttpResponse) {
        self.push(Ok(response));
    }

    /// Queue a JSON response with status 200.
    pub fn push_json(&self, body: serde_json::Value) {
        self.push_response(HttpResponse::new(200, body.to_string()));
    }

    /// Queue a transport failure.
    pub fn push_error(&self, error: TransportError) {
        self.push(Err(error));
    }

    /// Queue a connection failure for an arbitrary URL.
    pub fn push_connection_error(&self, message: &str) {
        self.push_error(TransportError::Connection {
            url: "mock".to_string(),
            message: message.to_string(),
        });
    }

    fn push(&self, outcome: Outcome) {
        self.outcomes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(outcome);
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Number of requests received so far.
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Number of outcomes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.outcomes.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl HttpTransport for MockTransport {
    fn get(&self, request: &HttpRequest) -> Outcome {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request.clone());

        self.outcomes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
            .unwrap_or_else(|| {
                Err(TransportError::Connection {
                    url: request.url.clone(),
                    message: "no scripted response left".to_string(),
                })
            })
    }
}

//! # Scripted Transport
//!
//! An [`ApiTransport`] that answers from a script and records every request.
//! Used by the test suites and by hosts that want to exercise controllers
//! without a backend.
//!
//! ```rust
//! use storefront::services::api::{mock::MockTransport, request::Method};
//!
//! let mock = MockTransport::new();
//! mock.respond(Method::Get, "/api/get_cart_count", 200, r#"{"success":true,"count":3}"#);
//! ```

use super::request::{ApiRequest, Method, RawResponse};
use crate::core::service::ApiTransport;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::time::Duration;

type Reply = Result<RawResponse, String>;

#[derive(Default)]
pub struct MockTransport {
    script: Mutex<HashMap<(Method, String), VecDeque<Reply>>>,
    requests: Mutex<Vec<ApiRequest>>,
    latency: Mutex<Option<Duration>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for `method path`.
    ///
    /// Replies are consumed in order; the last one queued for a route keeps
    /// answering once the others are used up.
    pub fn respond(&self, method: Method, path: &str, status: u16, body: impl Into<String>) -> &Self {
        self.push(method, path, Ok(RawResponse::new(status, body)))
    }

    pub fn respond_json(&self, method: Method, path: &str, status: u16, body: serde_json::Value) -> &Self {
        self.respond(method, path, status, body.to_string())
    }

    /// Queue a transport failure for `method path`.
    pub fn fail(&self, method: Method, path: &str, error: &str) -> &Self {
        self.push(method, path, Err(error.to_string()))
    }

    /// Delay every reply by `latency`.
    pub fn with_latency(self, latency: Duration) -> Self {
        *self.latency.lock() = Some(latency);
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn calls_to(&self, path: &str) -> usize {
        self.requests
            .lock()
            .iter()
            .filter(|request| request.path == path)
            .count()
    }

    pub fn last_request_to(&self, path: &str) -> Option<ApiRequest> {
        self.requests
            .lock()
            .iter()
            .rev()
            .find(|request| request.path == path)
            .cloned()
    }

    fn push(&self, method: Method, path: &str, reply: Reply) -> &Self {
        self.script
            .lock()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(reply);
        self
    }

    fn next_reply(&self, request: &ApiRequest) -> Reply {
        let mut script = self.script.lock();
        let Some(queue) = script.get_mut(&(request.method, request.path.clone())) else {
            return Err(format!(
                "No scripted response for {} {}",
                request.method, request.path
            ));
        };
        if queue.len() > 1 {
            queue.pop_front().unwrap_or_else(|| Err("empty script".to_string()))
        } else {
            queue
                .front()
                .cloned()
                .unwrap_or_else(|| Err("empty script".to_string()))
        }
    }
}

#[async_trait]
impl ApiTransport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, String> {
        self.requests.lock().push(request.clone());
        let latency = *self.latency.lock();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        self.next_reply(&request)
    }
}

//! In-memory transport for testing.
//!
//! [`MockTransport`] records every request it receives and answers with
//! responses queued in advance, in order.
//!
//! # Feature Flag
//!
//! This module is only available when the `test-utils` feature is enabled:
//!
//! ```toml
//! [dev-dependencies]
//! convertio = { version = "...", features = ["test-utils"] }
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use convertio::mock::MockTransport;
//! use convertio::{ConvertioClient, ConvertioConfig};
//!
//! let transport = MockTransport::new();
//! transport.respond(200, serde_json::json!({
//!     "code": 200,
//!     "status": "ok",
//!     "data": {"id": "abc", "minutes": 10}
//! }));
//!
//! let client = ConvertioClient::with_transport(ConvertioConfig::new("key"), transport.clone())?;
//! ```

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use bytes::Bytes;
use url::Url;

use crate::error::TransportError;
use crate::transport::{HttpRequest, HttpResponse, Method, Transport};

enum Reply {
    Response { status: u16, body: Bytes },
    Failure(TransportError),
}

#[derive(Default)]
struct MockState {
    replies: VecDeque<Reply>,
    sources: HashMap<Url, Bytes>,
    requests: Vec<HttpRequest>,
}

/// Transport returning canned responses.
///
/// Clones share the same queue and request log.
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl std::fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("MockTransport")
            .field("queued", &state.replies.len())
            .field("requests", &state.requests.len())
            .finish_non_exhaustive()
    }
}

impl MockTransport {
    /// Creates a transport with nothing queued.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queues a response with a JSON body.
    pub fn respond(&self, status: u16, body: serde_json::Value) -> &Self {
        self.respond_raw(status, body.to_string())
    }

    /// Queues a response with an arbitrary body.
    pub fn respond_raw(&self, status: u16, body: impl Into<Bytes>) -> &Self {
        self.lock().replies.push_back(Reply::Response {
            status,
            body: body.into(),
        });
        self
    }

    /// Queues a transport failure.
    pub fn fail(&self, error: TransportError) -> &Self {
        self.lock().replies.push_back(Reply::Failure(error));
        self
    }

    /// Serves `content` for downloads of `url`, without consuming the queue.
    pub fn with_source(&self, url: Url, content: impl Into<Bytes>) -> &Self {
        self.lock().sources.insert(url, content.into());
        self
    }

    /// Requests received so far, in order.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.lock().requests.clone()
    }

    /// Number of queued replies not yet consumed.
    pub fn pending(&self) -> usize {
        self.lock().replies.len()
    }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut state = self.lock();
        let url = request.url.clone();
        state.requests.push(request);

        match state.replies.pop_front() {
            Some(Reply::Response { status, body }) => Ok(HttpResponse { status, url, body }),
            Some(Reply::Failure(error)) => Err(error),
            None => Err(TransportError::request()
                .with_message(format!("no mock response queued for {url}"))),
        }
    }

    async fn fetch(&self, url: &Url) -> Result<Bytes, TransportError> {
        let source = {
            let mut state = self.lock();
            let source = state.sources.get(url).cloned();
            if source.is_some() {
                state
                    .requests
                    .push(HttpRequest::new(Method::GET, url.clone()));
            }
            source
        };

        if let Some(content) = source {
            return Ok(content);
        }

        let response = self.send(HttpRequest::new(Method::GET, url.clone())).await?;
        if !response.is_success() {
            return Err(TransportError::status(response.status)
                .with_message(format!("HTTP {} fetching {}", response.status, url)));
        }
        Ok(response.body)
    }
}

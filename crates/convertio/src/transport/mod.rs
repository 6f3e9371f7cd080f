//! HTTP transport used by the client.
//!
//! [`Transport`] is the seam between the client and the network: the client
//! builds fully-formed [`HttpRequest`]s and only ever sees status codes and
//! raw bodies back. [`ReqwestTransport`] is the production implementation.

mod http;

use bytes::Bytes;
pub use reqwest::Method;
use url::Url;

pub use self::http::ReqwestTransport;
use crate::error::TransportError;

/// An outgoing HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    /// Header name and value pairs.
    pub headers: Vec<(String, String)>,
    pub body: Option<Bytes>,
}

impl HttpRequest {
    /// Creates a request without headers or body.
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: Vec::new(),
            body: None,
        }
    }

    /// Adds a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets the body.
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Returns the first value of the header `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// A received HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// Effective URL after redirects.
    pub url: Url,
    pub body: Bytes,
}

impl HttpResponse {
    /// Returns whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs HTTP exchanges on behalf of the client.
///
/// Implementations perform exactly one exchange per call and never retry.
#[async_trait::async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    /// Sends a request and returns the response, whatever its status.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;

    /// Downloads the bytes found at `url`.
    ///
    /// Either the whole body is read or the call fails; a non-success status
    /// is reported as a transport failure.
    async fn fetch(&self, url: &Url) -> Result<Bytes, TransportError> {
        let response = self.send(HttpRequest::new(Method::GET, url.clone())).await?;
        if !response.is_success() {
            return Err(TransportError::status(response.status)
                .with_message(format!("HTTP {} fetching {}", response.status, url)));
        }
        Ok(response.body)
    }
}

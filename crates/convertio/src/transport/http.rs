//! Reqwest-based transport.

use std::sync::Arc;

use reqwest::Client;

use super::{HttpRequest, HttpResponse, Transport};
use crate::TRACING_TARGET_TRANSPORT;
use crate::client::ConvertioConfig;
use crate::error::{Error, Result, TransportError};

/// Reqwest-based HTTP transport.
///
/// Every request is bounded by the configured timeout. The underlying client
/// is shared, so cloning the transport is cheap.
#[derive(Clone)]
pub struct ReqwestTransport {
    http: Arc<Client>,
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport").finish_non_exhaustive()
    }
}

impl ReqwestTransport {
    /// Creates a transport using the timeout and user agent of `config`.
    pub fn new(config: &ConvertioConfig) -> Result<Self> {
        let timeout = config.effective_timeout();

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(config.effective_user_agent())
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        tracing::debug!(
            target: TRACING_TARGET_TRANSPORT,
            timeout_ms = timeout.as_millis(),
            "Reqwest transport created"
        );

        Ok(Self {
            http: Arc::new(http),
        })
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.http.request(request.method, request.url);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let url = response.url().clone();
        let body = response.bytes().await?;

        tracing::trace!(
            target: TRACING_TARGET_TRANSPORT,
            status,
            url = %url,
            size = body.len(),
            "Response received"
        );

        Ok(HttpResponse { status, url, body })
    }
}

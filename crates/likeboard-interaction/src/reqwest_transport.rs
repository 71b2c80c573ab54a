//! ReqwestTransport - HTTP transport to the likes backend.
//!
//! Resolves [`ApiRequest`] paths against the configured base URL and hands
//! every received response back unchanged, whatever its status.

use async_trait::async_trait;
use likeboard_core::http::{ApiRequest, ApiResponse, HttpMethod, HttpTransport};
use likeboard_core::{LikeboardError, Result};
use reqwest::{Client, Method};
use std::time::Duration;

#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
    timeout: Option<Duration>,
}

impl ReqwestTransport {
    /// Creates a transport for `base_url` (e.g. `http://localhost:8000/api`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: None,
        }
    }

    /// Sets a per-request timeout. Zero disables it.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = (!timeout.is_zero()).then_some(timeout);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

fn method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Delete => Method::DELETE,
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let url = self.url(&request.path);
        tracing::debug!(method = %request.method, %url, "Sending request");

        let mut builder = self.client.request(method(request.method), &url);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            // Raw body so a caller-supplied Content-Type is not overwritten.
            builder = builder.body(body.to_string());
        }
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(|err| {
            tracing::warn!(%url, error = %err, "Request failed");
            LikeboardError::transport(format!("{} {} failed: {}", request.method, url, err))
        })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|err| {
                LikeboardError::transport(format!("Failed to read response body: {err}"))
            })?;

        tracing::debug!(%url, status, "Received response");
        Ok(ApiResponse::new(status, body))
    }
}

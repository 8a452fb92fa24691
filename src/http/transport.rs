//! HTTP transport abstraction.
//!
//! [`SesHttpClient`](super::SesHttpClient) builds and signs an
//! [`HttpRequest`]; a [`Transport`] delivers it. The default transport uses
//! reqwest, tests plug in [`MockTransport`](crate::mocks::MockTransport).

use async_trait::async_trait;
use http::HeaderMap;
use std::collections::HashMap;
use std::time::Duration;

use crate::error::{SesError, SesResult};

/// HTTP request to be sent.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: String,
    /// Full request URL.
    pub url: String,
    /// Request headers, signing headers included.
    pub headers: HeaderMap,
    /// Request body.
    pub body: Vec<u8>,
}

impl HttpRequest {
    /// Create a new request with no headers and an empty body.
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            headers: HeaderMap::new(),
            body: Vec::new(),
        }
    }

    /// Set the request body.
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Header value as a string, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Body as UTF-8 text.
    pub fn body_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }
}

/// HTTP response received.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers, names lowercased.
    pub headers: HashMap<String, String>,
    /// Response body.
    pub body: Vec<u8>,
}

/// Sends HTTP requests.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request and return the response, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns an error only if no response was received.
    async fn send(&self, request: HttpRequest) -> SesResult<HttpResponse>;
}

/// Transport backed by a reqwest client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with the given timeouts and user agent.
    ///
    /// ```
    /// use postman::http::ReqwestTransport;
    /// use std::time::Duration;
    ///
    /// let transport = ReqwestTransport::new(
    ///     Duration::from_secs(30),
    ///     Duration::from_secs(10),
    ///     "postman/test",
    /// );
    /// assert!(transport.is_ok());
    /// ```
    pub fn new(timeout: Duration, connect_timeout: Duration, user_agent: &str) -> SesResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| SesError::Configuration {
                message: format!("Failed to build HTTP client: {}", e),
                source: Some(Box::new(e)),
            })?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> SesResult<HttpResponse> {
        let method = request
            .method
            .parse::<reqwest::Method>()
            .map_err(|e| SesError::Transport {
                message: format!("Invalid HTTP method '{}': {}", request.method, e),
                source: None,
            })?;

        let response = self
            .client
            .request(method, &request.url)
            .headers(request.headers)
            .body(request.body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| (k.as_str().to_lowercase(), v.to_str().unwrap_or("").to_string()))
            .collect();
        let body = response.bytes().await?.to_vec();

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

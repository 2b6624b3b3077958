// SPDX-License-Identifier: MIT OR Apache-2.0

//! Blocking `reqwest` transport adapter.
//!
//! This module provides the production implementation of `HttpTransport`.

use crate::domain::{ClientConfig, KvError, Result};
use crate::ports::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use std::time::Duration;

/// Header carrying the ACL token.
pub const TOKEN_HEADER: &str = "X-Consul-Token";

/// HTTP transport backed by a blocking `reqwest` client.
///
/// The underlying client pools connections and is cheap to share. The ACL
/// token and the default timeout are fixed when the transport is built.
///
/// The timeout bounds connecting and, per request, the whole round trip. A
/// request that carries its own [`HttpRequest::timeout`] (a blocking query)
/// uses that instead, so a long wait is not cut short by the client.
///
/// # Examples
///
/// ```rust,no_run
/// use consulkv::adapters::ReqwestTransport;
/// use consulkv::domain::ClientConfig;
///
/// let transport = ReqwestTransport::from_config(&ClientConfig::default()).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Creates a transport with the given timeout and no token.
    pub fn new(timeout: Duration) -> Result<Self> {
        Self::build(timeout, None)
    }

    /// Creates a transport using the timeout and token from `config`.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::build(config.timeout(), config.token.as_deref())
    }

    fn build(timeout: Duration, token: Option<&str>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            let mut value = HeaderValue::from_str(token).map_err(|e| KvError::ConfigError {
                message: "ACL token is not a valid header value".to_string(),
                source: Some(Box::new(e)),
            })?;
            value.set_sensitive(true);
            headers.insert(TOKEN_HEADER, value);
        }

        // No client-wide deadline: each request gets its own in `execute`.
        let client = Client::builder()
            .timeout(None::<Duration>)
            .connect_timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| KvError::TransportError {
                message: "Failed to build HTTP client".to_string(),
                source: Some(Box::new(e)),
            })?;

        Ok(Self { client, timeout })
    }

    fn method(method: HttpMethod) -> reqwest::Method {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

impl HttpTransport for ReqwestTransport {
    fn name(&self) -> &str {
        "reqwest"
    }

    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let pairs: Vec<(&str, &str)> = request.params.iter().collect();

        let mut builder = self
            .client
            .request(Self::method(request.method), request.url.clone())
            .query(&pairs)
            .timeout(request.timeout.unwrap_or(self.timeout));

        if let Some(body) = &request.body {
            builder = builder
                .header(CONTENT_TYPE, "text/plain; charset=utf-8")
                .body(body.clone());
        }

        let response = builder.send().map_err(|e| KvError::TransportError {
            message: format!("{} {} failed: {}", request.method, request.url, e),
            source: Some(Box::new(e)),
        })?;

        let status = response.status().as_u16();
        // Reading the body to the end hands the connection back to the pool.
        let body = response.text().map_err(|e| KvError::TransportError {
            message: format!("Failed to read response body: {}", e),
            source: Some(Box::new(e)),
        })?;

        Ok(HttpResponse { status, body })
    }
}

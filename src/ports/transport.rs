// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP transport trait definition.
//!
//! This module defines the `HttpTransport` trait, the port through which the
//! key/value client reaches the store. The client decides *what* to send and
//! how to interpret the answer; a transport only moves bytes.

use crate::domain::{QueryParams, Result};
use std::fmt;
use std::time::Duration;
use url::Url;

/// HTTP methods used by the key/value endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// Read
    Get,
    /// Create or update
    Put,
    /// Remove
    Delete,
}

impl HttpMethod {
    /// Returns the method name as sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully-described request.
///
/// `url` never carries a query string; all parameters live in `params`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    /// Method
    pub method: HttpMethod,
    /// Target URL without query string
    pub url: Url,
    /// Query parameters, applied in order
    pub params: QueryParams,
    /// Plain-text request body
    pub body: Option<String>,
    /// Overrides the transport's own timeout for this request
    ///
    /// Set by blocking queries, which legitimately keep the connection open
    /// for up to their wait time.
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    /// Creates a request without parameters or body.
    pub fn new(method: HttpMethod, url: Url) -> Self {
        Self {
            method,
            url,
            params: QueryParams::new(),
            body: None,
            timeout: None,
        }
    }

    /// Replaces the query parameters.
    pub fn with_params(mut self, params: QueryParams) -> Self {
        self.params = params;
        self
    }

    /// Sets the request body.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets a timeout for this request only.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// A fully-read response.
///
/// The body is read to the end before the transport returns, so holding an
/// `HttpResponse` never pins a connection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status code
    pub status: u16,
    /// Body text (empty when the store sent none)
    pub body: String,
}

impl HttpResponse {
    /// Creates a response.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns `true` for 200 OK.
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Returns `true` for 404 Not Found.
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    /// Returns `true` if the body is empty or only whitespace.
    pub fn is_empty(&self) -> bool {
        self.body.trim().is_empty()
    }
}

/// A blocking HTTP transport.
///
/// Implementations perform exactly one round trip per call: no retries, no
/// caching. Connection and timeout failures must be reported as
/// [`KvError::TransportError`](crate::domain::KvError::TransportError); any
/// response that arrives, whatever its status, is returned as `Ok`.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so one client can be shared across
/// threads.
///
/// # Examples
///
/// ```rust
/// use consulkv::domain::Result;
/// use consulkv::ports::{HttpRequest, HttpResponse, HttpTransport};
///
/// struct AlwaysEmpty;
///
/// impl HttpTransport for AlwaysEmpty {
///     fn name(&self) -> &str {
///         "always-empty"
///     }
///
///     fn execute(&self, _request: &HttpRequest) -> Result<HttpResponse> {
///         Ok(HttpResponse::new(404, ""))
///     }
/// }
/// ```
pub trait HttpTransport: Send + Sync {
    /// Returns a short name for logging.
    fn name(&self) -> &str;

    /// Sends `request` and reads the whole response.
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse>;
}

impl<T: HttpTransport + ?Sized> HttpTransport for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
        (**self).execute(request)
    }
}

impl<T: HttpTransport + ?Sized> HttpTransport for std::sync::Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
        (**self).execute(request)
    }
}

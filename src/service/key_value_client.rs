// SPDX-License-Identifier: MIT OR Apache-2.0

//! Key/value client implementation.
//!
//! This module provides `KeyValueClient`, which maps every `KeyValueStore`
//! operation onto a single request against the `/v1/kv/` endpoints and
//! translates the response back into typed results.

use crate::domain::{
    ClientConfig, KeyValueStore, KvEntry, KvError, PutOptions, QueryOptions, QueryParams, Result,
};
use crate::ports::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// Client for the `/v1/kv/` endpoints.
///
/// Holds only immutable settings and the transport, so a single instance can
/// be shared between threads. Every call
/// is one HTTP round trip; nothing is cached and nothing is retried.
///
/// # Examples
///
/// ```rust,no_run
/// use consulkv::prelude::*;
///
/// # fn main() -> consulkv::domain::Result<()> {
/// let client = KeyValueClient::builder()
///     .with_address("http://127.0.0.1:8500")
///     .build()?;
///
/// client.put_value("config/app/name", "billing")?;
/// assert_eq!(
///     client.get_value_as_string("config/app/name")?.as_deref(),
///     Some("billing")
/// );
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct KeyValueClient<T: HttpTransport> {
    /// Base URL ending in `/v1/kv/`
    base_url: Url,
    /// Datacenter applied to reads that do not name one
    datacenter: Option<String>,
    /// Round-trip allowance that blocking reads extend by their wait
    timeout: Duration,
    /// Transport used for every request
    transport: T,
}

impl<T: HttpTransport> KeyValueClient<T> {
    /// Creates a client for the endpoints below `base_url`.
    ///
    /// `base_url` must point at the key/value root, e.g.
    /// `http://127.0.0.1:8500/v1/kv/`. A missing trailing slash is added.
    pub fn new(mut base_url: Url, transport: T) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        base_url.set_query(None);

        Self {
            base_url,
            datacenter: None,
            timeout: ClientConfig::default().timeout(),
            transport,
        }
    }

    /// Sets the datacenter used by reads whose options do not name one.
    pub fn with_datacenter(mut self, datacenter: impl Into<String>) -> Self {
        self.datacenter = Some(datacenter.into()).filter(|dc: &String| !dc.is_empty());
        self
    }

    /// Sets the round-trip allowance used to size blocking reads.
    ///
    /// A read with [`QueryOptions::with_blocking_wait`] is given this much
    /// time on top of its wait; other requests use the transport's timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the base URL of the key/value endpoints.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Builds the URL of `key`, percent-encoding each path segment.
    ///
    /// `/` separators and a trailing `/` are kept; leading slashes are
    /// dropped. A `.` or `..` segment would be resolved away by URL
    /// normalization and address a different key, so it is rejected.
    pub fn key_url(&self, key: &str) -> Result<Url> {
        let relative = key.trim_start_matches('/');
        if relative.split('/').any(|segment| segment == "." || segment == "..") {
            return Err(KvError::InvalidKey {
                key: key.to_string(),
                message: "'.' and '..' segments are not allowed".to_string(),
            });
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| KvError::ConfigError {
                message: format!("Base URL '{}' cannot hold a path", self.base_url),
                source: None,
            })?
            .pop_if_empty()
            .extend(relative.split('/'));
        Ok(url)
    }

    /// Adds the default datacenter when `options` does not carry one.
    fn read_params(&self, options: &QueryOptions) -> QueryParams {
        let params = options.to_params();
        if params.contains("dc") {
            return params;
        }
        params.with_opt("dc", self.datacenter.as_deref())
    }

    fn send(&self, method: HttpMethod, key: &str, params: QueryParams) -> Result<HttpResponse> {
        self.send_request(HttpRequest::new(method, self.key_url(key)?).with_params(params))
    }

    fn send_request(&self, request: HttpRequest) -> Result<HttpResponse> {
        tracing::debug!(
            "{} {} [{}] via {}",
            request.method,
            request.url,
            request.params,
            self.transport.name()
        );
        let response = self.transport.execute(&request)?;
        tracing::debug!("{} {} -> {}", request.method, request.url, response.status);
        Ok(response)
    }

    /// Turns a read response into its parsed body.
    ///
    /// 404 and an empty 200 body both mean "nothing there".
    fn read_body<D: DeserializeOwned>(
        &self,
        key: &str,
        response: HttpResponse,
        what: &str,
    ) -> Result<Option<D>> {
        if response.is_not_found() {
            tracing::debug!("Key '{}' not found", key);
            return Ok(None);
        }
        if !response.is_ok() {
            return Err(unexpected_status(key, response));
        }
        if response.is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&response.body)
            .map(Some)
            .map_err(|e| KvError::from_json_error(what, e))
    }

    fn delete(&self, key: &str, params: QueryParams) -> Result<()> {
        let response = self.send(HttpMethod::Delete, key, params)?;
        if response.is_ok() {
            Ok(())
        } else {
            Err(unexpected_status(key, response))
        }
    }
}

#[cfg(feature = "http")]
impl KeyValueClient<crate::adapters::ReqwestTransport> {
    /// Creates a builder for a client backed by the `reqwest` transport.
    pub fn builder() -> KeyValueClientBuilder {
        KeyValueClientBuilder::new()
    }

    /// Creates a `reqwest`-backed client from `config`.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let transport = crate::adapters::ReqwestTransport::from_config(config)?;
        Self::with_transport(config, transport)
    }
}

impl<T: HttpTransport> KeyValueClient<T> {
    /// Creates a client from `config` on top of an explicit transport.
    ///
    /// The token in `config` is the transport's business. The timeout is
    /// used here only to size blocking reads.
    pub fn with_transport(config: &ClientConfig, transport: T) -> Result<Self> {
        let client = Self::new(config.kv_base_url()?, transport).with_timeout(config.timeout());
        Ok(match &config.datacenter {
            Some(dc) => client.with_datacenter(dc.clone()),
            None => client,
        })
    }
}

fn unexpected_status(key: &str, response: HttpResponse) -> KvError {
    tracing::warn!(
        "Unexpected status {} for key '{}': {}",
        response.status,
        key,
        response.body
    );
    KvError::ProtocolError {
        status: response.status,
        body: response.body,
    }
}

impl<T: HttpTransport> KeyValueStore for KeyValueClient<T> {
    fn get_value_with_options(
        &self,
        key: &str,
        options: &QueryOptions,
    ) -> Result<Option<KvEntry>> {
        let mut request =
            HttpRequest::new(HttpMethod::Get, self.key_url(key)?).with_params(self.read_params(options));
        if let Some(blocking) = &options.blocking {
            request = request.with_timeout(blocking.request_timeout(self.timeout));
        }
        let response = self.send_request(request)?;
        let entries: Option<Vec<KvEntry>> = self.read_body(key, response, "array of entries")?;
        Ok(entries.and_then(|entries| entries.into_iter().next()))
    }

    fn get_values(&self, key: &str) -> Result<Vec<KvEntry>> {
        let params = QueryParams::new()
            .with("recurse", "true")
            .extend(self.read_params(&QueryOptions::default()));
        let response = self.send(HttpMethod::Get, key, params)?;
        Ok(self
            .read_body(key, response, "array of entries")?
            .unwrap_or_default())
    }

    fn put_value_with_options(
        &self,
        key: &str,
        value: &str,
        flags: u64,
        options: &PutOptions,
    ) -> Result<bool> {
        let request = HttpRequest::new(HttpMethod::Put, self.key_url(key)?)
            .with_params(options.to_params(flags))
            .with_body(value);
        let response = self.send_request(request)?;

        if !response.is_ok() {
            return Err(unexpected_status(key, response));
        }
        serde_json::from_str::<bool>(response.body.trim())
            .map_err(|e| KvError::from_json_error("boolean", e))
    }

    fn get_keys(&self, key: &str) -> Result<Vec<String>> {
        let params = QueryParams::new()
            .with("keys", "true")
            .extend(self.read_params(&QueryOptions::default()));
        let response = self.send(HttpMethod::Get, key, params)?;
        Ok(self
            .read_body(key, response, "array of key names")?
            .unwrap_or_default())
    }

    fn delete_key(&self, key: &str) -> Result<()> {
        self.delete(key, QueryParams::new())
    }

    fn delete_keys(&self, key: &str) -> Result<()> {
        self.delete(key, QueryParams::new().with("recurse", "true"))
    }
}

/// Builder for a `reqwest`-backed [`KeyValueClient`].
///
/// # Examples
///
/// ```rust,no_run
/// use consulkv::service::KeyValueClientBuilder;
///
/// # fn main() -> consulkv::domain::Result<()> {
/// let client = KeyValueClientBuilder::new()
///     .with_address("consul.service.internal:8500")
///     .with_token("b1gs33cr3t")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[cfg(feature = "http")]
#[derive(Debug, Clone, Default)]
pub struct KeyValueClientBuilder {
    config: ClientConfig,
}

#[cfg(feature = "http")]
impl KeyValueClientBuilder {
    /// Creates a builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole configuration.
    pub fn with_config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the agent address.
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.config.address = ClientConfig::new(address).address;
        self
    }

    /// Sets the ACL token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.config.token = Some(token.into());
        self
    }

    /// Sets the default datacenter for reads.
    pub fn with_datacenter(mut self, datacenter: impl Into<String>) -> Self {
        self.config.datacenter = Some(datacenter.into());
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_timeout(timeout);
        self
    }

    /// Builds the client.
    pub fn build(self) -> Result<KeyValueClient<crate::adapters::ReqwestTransport>> {
        KeyValueClient::from_config(&self.config)
    }
}

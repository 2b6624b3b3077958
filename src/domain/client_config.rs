// SPDX-License-Identifier: MIT OR Apache-2.0

//! Client connection settings.
//!
//! `ClientConfig` says where the agent lives and how to talk to it. It can be
//! built in code, read from the standard `CONSUL_*` environment variables, or
//! loaded from a YAML file.

use crate::domain::errors::{KvError, Result};
use serde::{Deserialize, Serialize};
#[cfg(feature = "env")]
use std::collections::HashMap;
#[cfg(feature = "yaml")]
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Agent address used when nothing else is configured.
pub const DEFAULT_ADDRESS: &str = "http://127.0.0.1:8500";

/// Request timeout, in milliseconds, used when nothing else is configured.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Environment variable holding the agent address.
pub const ENV_HTTP_ADDR: &str = "CONSUL_HTTP_ADDR";
/// Environment variable holding the ACL token.
pub const ENV_HTTP_TOKEN: &str = "CONSUL_HTTP_TOKEN";
/// Environment variable holding the default datacenter.
pub const ENV_DATACENTER: &str = "CONSUL_DATACENTER";
/// Environment variable holding the request timeout in milliseconds.
pub const ENV_TIMEOUT_MS: &str = "CONSUL_TIMEOUT_MS";

/// Settings for connecting to an agent.
///
/// # Examples
///
/// ```
/// use consulkv::domain::ClientConfig;
///
/// let config = ClientConfig::new("consul.service.internal:8500")
///     .with_token("b1gs33cr3t")
///     .with_datacenter("dc1");
///
/// assert_eq!(config.address, "http://consul.service.internal:8500");
/// assert_eq!(config.kv_base_url().unwrap().as_str(), "http://consul.service.internal:8500/v1/kv/");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Agent base address, including scheme
    pub address: String,
    /// ACL token sent with every request
    pub token: Option<String>,
    /// Datacenter used for reads that do not name one
    pub datacenter: Option<String>,
    /// Request timeout in milliseconds; blocking queries extend it by their wait
    pub timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            token: None,
            datacenter: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl ClientConfig {
    /// Creates a configuration for the given address.
    ///
    /// An address without a scheme is assumed to be plain HTTP.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: normalize_address(address.into()),
            ..Self::default()
        }
    }

    /// Sets the ACL token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets the default datacenter.
    pub fn with_datacenter(mut self, datacenter: impl Into<String>) -> Self {
        self.datacenter = Some(datacenter.into());
        self
    }

    /// Sets the request timeout.
    ///
    /// Sub-second precision is kept down to the millisecond.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Returns the request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Checks that the address is a usable HTTP(S) URL and the timeout is
    /// not zero.
    pub fn validate(&self) -> Result<()> {
        if self.timeout_ms == 0 {
            return Err(KvError::ConfigError {
                message: "Request timeout must be at least one millisecond".to_string(),
                source: None,
            });
        }

        let url = Url::parse(&self.address).map_err(|e| KvError::ConfigError {
            message: format!("Invalid agent address '{}'", self.address),
            source: Some(Box::new(e)),
        })?;

        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(KvError::ConfigError {
                message: format!("Unsupported scheme '{}' in agent address", other),
                source: None,
            }),
        }
    }

    /// Returns the base URL of the key/value endpoints (`<address>/v1/kv/`).
    pub fn kv_base_url(&self) -> Result<Url> {
        self.validate()?;
        let base = format!("{}/v1/kv/", self.address.trim_end_matches('/'));
        Url::parse(&base).map_err(|e| KvError::ConfigError {
            message: format!("Invalid agent address '{}'", self.address),
            source: Some(Box::new(e)),
        })
    }

    /// Loads the configuration from the process environment.
    ///
    /// Unset variables keep their defaults.
    #[cfg(feature = "env")]
    pub fn from_env() -> Result<Self> {
        let values = [ENV_HTTP_ADDR, ENV_HTTP_TOKEN, ENV_DATACENTER, ENV_TIMEOUT_MS]
            .iter()
            .filter_map(|name| std::env::var(name).ok().map(|v| (name.to_string(), v)))
            .collect();
        Self::from_env_values(values)
    }

    /// Builds a configuration from explicit environment-style values.
    ///
    /// Used by [`ClientConfig::from_env`]; handy in tests that must not touch
    /// the real environment.
    #[cfg(feature = "env")]
    pub fn from_env_values(values: HashMap<String, String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(address) = values.get(ENV_HTTP_ADDR).filter(|v| !v.is_empty()) {
            config.address = normalize_address(address.clone());
        }
        config.token = values.get(ENV_HTTP_TOKEN).filter(|v| !v.is_empty()).cloned();
        config.datacenter = values.get(ENV_DATACENTER).filter(|v| !v.is_empty()).cloned();

        if let Some(timeout) = values.get(ENV_TIMEOUT_MS) {
            config.timeout_ms = timeout.parse().map_err(|e| KvError::ConfigError {
                message: format!("{} must be a whole number of milliseconds", ENV_TIMEOUT_MS),
                source: Some(Box::new(e)),
            })?;
        }

        tracing::debug!("Loaded client configuration from environment: {}", config.address);
        config.validate()?;
        Ok(config)
    }

    /// Loads the configuration from a YAML file.
    ///
    /// ```yaml
    /// address: https://consul.example.com
    /// token: b1gs33cr3t
    /// datacenter: dc1
    /// timeout_ms: 30000
    /// ```
    #[cfg(feature = "yaml")]
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&contents)
    }

    /// Parses the configuration from YAML text.
    #[cfg(feature = "yaml")]
    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        let mut config: Self =
            serde_yaml::from_str(contents).map_err(|e| KvError::ConfigError {
                message: "Malformed YAML client configuration".to_string(),
                source: Some(Box::new(e)),
            })?;
        config.address = normalize_address(config.address);
        config.validate()?;
        Ok(config)
    }

    /// Loads `consul.yaml` from the OS-appropriate configuration directory.
    ///
    /// # Arguments
    ///
    /// * `app_name` - The application name
    /// * `qualifier` - The organization/qualifier (e.g., "com.example")
    #[cfg(feature = "yaml")]
    pub fn from_default_location(app_name: &str, qualifier: &str) -> Result<Self> {
        let proj_dirs = directories::ProjectDirs::from(qualifier, "", app_name).ok_or_else(|| {
            KvError::ConfigError {
                message: "Failed to determine project directories".to_string(),
                source: None,
            }
        })?;

        Self::from_yaml_file(proj_dirs.config_dir().join("consul.yaml"))
    }
}

fn normalize_address(address: String) -> String {
    if address.contains("://") {
        address
    } else {
        format!("http://{}", address)
    }
}

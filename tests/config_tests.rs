// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tests for loading client configuration from files and environment values.

#![cfg(all(feature = "yaml", feature = "env", feature = "http"))]

use consulkv::domain::client_config::{ENV_DATACENTER, ENV_HTTP_ADDR, ENV_HTTP_TOKEN};
use consulkv::domain::{ClientConfig, KvError};
use consulkv::service::KeyValueClient;
use std::collections::HashMap;
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

#[test]
fn test_yaml_file_full() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "address: https://consul.example.com:8501\ntoken: s3cr3t\ndatacenter: dc7\ntimeout_ms: 45000"
    )
    .unwrap();

    let config = ClientConfig::from_yaml_file(file.path()).unwrap();
    assert_eq!(config.address, "https://consul.example.com:8501");
    assert_eq!(config.token.as_deref(), Some("s3cr3t"));
    assert_eq!(config.datacenter.as_deref(), Some("dc7"));
    assert_eq!(config.timeout(), Duration::from_secs(45));
}

#[test]
fn test_yaml_file_empty_mapping_uses_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{{}}").unwrap();

    let config = ClientConfig::from_yaml_file(file.path()).unwrap();
    assert_eq!(config, ClientConfig::default());
}

#[test]
fn test_yaml_file_missing_is_io_error() {
    let result = ClientConfig::from_yaml_file("/nonexistent/consul.yaml");
    assert!(matches!(result, Err(KvError::IoError(_))));
}

#[test]
fn test_yaml_malformed_is_config_error() {
    let result = ClientConfig::from_yaml_str("address: [unterminated");
    assert!(matches!(result, Err(KvError::ConfigError { .. })));
}

#[test]
fn test_yaml_bad_scheme_rejected() {
    let result = ClientConfig::from_yaml_str("address: gopher://consul:70");
    assert!(matches!(result, Err(KvError::ConfigError { .. })));
}

#[test]
fn test_env_values_build_client() {
    let mut values = HashMap::new();
    values.insert(ENV_HTTP_ADDR.to_string(), "https://consul.internal".to_string());
    values.insert(ENV_HTTP_TOKEN.to_string(), "token".to_string());
    values.insert(ENV_DATACENTER.to_string(), "west".to_string());

    let config = ClientConfig::from_env_values(values).unwrap();
    let client = KeyValueClient::from_config(&config).unwrap();

    assert_eq!(
        client.base_url().as_str(),
        "https://consul.internal/v1/kv/"
    );
}

#[test]
fn test_empty_env_values_are_defaults() {
    let mut values = HashMap::new();
    values.insert(ENV_HTTP_ADDR.to_string(), String::new());
    values.insert(ENV_HTTP_TOKEN.to_string(), String::new());

    let config = ClientConfig::from_env_values(values).unwrap();
    assert_eq!(config, ClientConfig::default());
}

#[test]
fn test_builder_overrides() {
    let client = KeyValueClient::builder()
        .with_config(ClientConfig::new("10.1.1.1:8500"))
        .with_address("10.2.2.2:8500")
        .with_datacenter("dc4")
        .with_timeout(Duration::from_secs(2))
        .build()
        .unwrap();

    assert_eq!(client.base_url().as_str(), "http://10.2.2.2:8500/v1/kv/");
}

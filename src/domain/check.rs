// SPDX-License-Identifier: MIT OR Apache-2.0

//! Agent health-check definition.

use serde::{Deserialize, Serialize};

/// A health check as registered with a local agent.
///
/// Plain data; every field is optional and unknown fields are ignored when
/// deserializing.
///
/// # Examples
///
/// ```
/// use consulkv::domain::Check;
///
/// let check: Check = serde_json::from_str(
///     r#"{"ID":"api","Name":"API health","http":"http://localhost:8080/health","Interval":"10s"}"#,
/// ).unwrap();
///
/// assert_eq!(check.id.as_deref(), Some("api"));
/// assert_eq!(check.http.as_deref(), Some("http://localhost:8080/health"));
/// assert!(check.ttl.is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Check {
    /// Check identifier
    #[serde(rename = "ID", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Human-readable name
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Free-form notes
    #[serde(rename = "Notes", default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Script the agent runs
    #[serde(rename = "Script", default, skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
    /// URL the agent polls
    #[serde(rename = "http", default, skip_serializing_if = "Option::is_none")]
    pub http: Option<String>,
    /// Interval between runs, e.g. `"10s"`
    #[serde(rename = "Interval", default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<String>,
    /// Time-to-live for TTL checks
    #[serde(rename = "TTL", default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<String>,
}

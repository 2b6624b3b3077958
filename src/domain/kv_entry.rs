// SPDX-License-Identifier: MIT OR Apache-2.0

//! Key/value entry as returned by the store.
//!
//! This module provides the `KvEntry` type, a snapshot of one stored record
//! together with its indices, flags and lock holder.

use crate::domain::errors::{KvError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// A stored key/value record.
///
/// The payload travels base64-encoded; `value` holds it exactly as the store
/// sent it and [`KvEntry::decoded_value`] turns it back into a string. A key
/// created without a body comes back with a null `Value`, which is kept as
/// `None`.
///
/// # Examples
///
/// ```
/// use consulkv::domain::KvEntry;
///
/// let json = r#"{"Key":"config/app/name","Value":"YmlsbGluZw==","Flags":0,
///               "CreateIndex":12,"ModifyIndex":14,"LockIndex":0}"#;
/// let entry: KvEntry = serde_json::from_str(json).unwrap();
///
/// assert_eq!(entry.key, "config/app/name");
/// assert_eq!(entry.decoded_value().unwrap(), "billing");
/// assert!(entry.session.is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KvEntry {
    /// Fully-qualified key
    #[serde(rename = "Key")]
    pub key: String,
    /// Base64-encoded payload
    #[serde(rename = "Value", default)]
    pub value: Option<String>,
    /// Caller-defined flags
    #[serde(rename = "Flags", default)]
    pub flags: u64,
    /// Raft index at which the entry was created
    #[serde(rename = "CreateIndex", default)]
    pub create_index: u64,
    /// Raft index of the last modification
    #[serde(rename = "ModifyIndex", default)]
    pub modify_index: u64,
    /// Number of times the lock on this entry has been acquired
    #[serde(rename = "LockIndex", default)]
    pub lock_index: u64,
    /// Session currently holding the lock, if any
    #[serde(rename = "Session", default, skip_serializing_if = "Option::is_none")]
    pub session: Option<String>,
}

impl KvEntry {
    /// Decodes the raw payload bytes.
    ///
    /// A null payload decodes to an empty buffer.
    pub fn decoded_bytes(&self) -> Result<Vec<u8>> {
        match &self.value {
            Some(encoded) => STANDARD
                .decode(encoded)
                .map_err(|e| KvError::from_base64_error(self.key.clone(), e)),
            None => Ok(Vec::new()),
        }
    }

    /// Decodes the payload into a UTF-8 string.
    ///
    /// Fails with [`KvError::DecodeError`] when the payload is not valid
    /// base64 or the decoded bytes are not valid UTF-8.
    pub fn decoded_value(&self) -> Result<String> {
        let bytes = self.decoded_bytes()?;
        String::from_utf8(bytes).map_err(|e| KvError::from_utf8_error(self.key.clone(), e))
    }

    /// Returns `true` if a session currently holds the lock on this entry.
    pub fn is_locked(&self) -> bool {
        self.session.as_deref().is_some_and(|s| !s.is_empty())
    }
}

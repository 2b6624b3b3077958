// SPDX-License-Identifier: MIT OR Apache-2.0

//! Key/value service trait definition.
//!
//! This module defines the `KeyValueStore` trait, the operation surface of the
//! key/value API. Keys are `/`-delimited paths; a key used as a prefix selects
//! every entry below it.

use crate::domain::{KvEntry, PutOptions, QueryOptions, Result};

/// Operations against a hierarchical key/value store.
///
/// A missing key is reported as `Ok(None)` or an empty list, never as an
/// error. Only [`KeyValueStore::get_value_with_options`],
/// [`KeyValueStore::get_values`], [`KeyValueStore::get_keys`],
/// [`KeyValueStore::put_value_with_options`], [`KeyValueStore::delete_key`]
/// and [`KeyValueStore::delete_keys`] must be implemented; the remaining
/// methods compose them.
pub trait KeyValueStore {
    /// Retrieves the entry stored at `key`.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(KvEntry))` - The first entry the store returned
    /// * `Ok(None)` - No entry exists for the key
    /// * `Err(KvError)` - The request failed
    fn get_value(&self, key: &str) -> Result<Option<KvEntry>> {
        self.get_value_with_options(key, &QueryOptions::default())
    }

    /// Retrieves the entry stored at `key` with explicit read options
    /// (consistency mode, blocking wait, datacenter).
    fn get_value_with_options(&self, key: &str, options: &QueryOptions)
        -> Result<Option<KvEntry>>;

    /// Retrieves every entry whose key starts with `key`, in store order.
    fn get_values(&self, key: &str) -> Result<Vec<KvEntry>>;

    /// Retrieves the value at `key` decoded as a UTF-8 string.
    ///
    /// A payload that is not valid base64 or not valid UTF-8 is a
    /// [`KvError::DecodeError`](crate::domain::KvError::DecodeError).
    fn get_value_as_string(&self, key: &str) -> Result<Option<String>> {
        self.get_value(key)?
            .map(|entry| entry.decoded_value())
            .transpose()
    }

    /// Retrieves every value below `key` decoded as strings, in store order.
    fn get_values_as_string(&self, key: &str) -> Result<Vec<String>> {
        self.get_values(key)?
            .iter()
            .map(KvEntry::decoded_value)
            .collect()
    }

    /// Stores `value` at `key`.
    ///
    /// Returns whether the store applied the write.
    fn put_value(&self, key: &str, value: &str) -> Result<bool> {
        self.put_value_with_options(key, value, 0, &PutOptions::default())
    }

    /// Stores `value` at `key` with caller-defined `flags`.
    fn put_value_with_flags(&self, key: &str, value: &str, flags: u64) -> Result<bool> {
        self.put_value_with_options(key, value, flags, &PutOptions::default())
    }

    /// Stores `value` at `key` with flags and write options.
    ///
    /// Returns `Ok(false)` when a CAS or lock precondition was not met; the
    /// stored state is then unchanged.
    fn put_value_with_options(
        &self,
        key: &str,
        value: &str,
        flags: u64,
        options: &PutOptions,
    ) -> Result<bool>;

    /// Lists the key names below `key`, without values.
    fn get_keys(&self, key: &str) -> Result<Vec<String>>;

    /// Deletes the entry at exactly `key`.
    fn delete_key(&self, key: &str) -> Result<()>;

    /// Deletes every entry whose key starts with `key`.
    fn delete_keys(&self, key: &str) -> Result<()>;
}

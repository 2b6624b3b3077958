// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the key/value client.
//!
//! A missing key is never an error: reads return `None` or an empty list.
//! Everything else the store or the transport reports surfaces through
//! [`KvError`], which uses `thiserror` for the `Display` and `Error` impls.

use std::string::FromUtf8Error;
use thiserror::Error;

/// The main error type for key/value operations.
///
/// Marked `#[non_exhaustive]` so new failure classes can be added without
/// breaking downstream matches.
///
/// # Examples
///
/// ```
/// use consulkv::domain::errors::KvError;
///
/// fn delete_failed() -> Result<(), KvError> {
///     Err(KvError::ProtocolError {
///         status: 403,
///         body: "Permission denied".to_string(),
///     })
/// }
///
/// assert!(delete_failed().unwrap_err().to_string().contains("Permission denied"));
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum KvError {
    /// The store answered with a status code this operation does not accept.
    #[error("Unexpected response status {status}: {body}")]
    ProtocolError {
        /// The HTTP status code
        status: u16,
        /// The response body as returned by the store
        body: String,
    },

    /// A stored payload could not be decoded into a string.
    #[error("Failed to decode value for key '{key}': {source}")]
    DecodeError {
        /// The key whose payload was malformed
        key: String,
        /// The underlying base64 or UTF-8 error
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The request never produced a response (connect, timeout, I/O).
    #[error("Transport error: {message}")]
    TransportError {
        /// The error message
        message: String,
        /// The underlying transport error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A response body did not have the expected JSON shape.
    #[error("Failed to parse response: {message}")]
    ParseError {
        /// The error message
        message: String,
        /// The underlying parsing error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The client configuration is invalid or could not be loaded.
    #[error("Invalid client configuration: {message}")]
    ConfigError {
        /// The error message
        message: String,
        /// The underlying error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A key cannot be addressed as a URL path (a `.` or `..` segment).
    #[error("Invalid key '{key}': {message}")]
    InvalidKey {
        /// The rejected key
        key: String,
        /// Why the key was rejected
        message: String,
    },

    /// An I/O error occurred while reading configuration.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl KvError {
    /// Creates a DecodeError from a base64 decoding failure.
    pub fn from_base64_error(key: String, err: base64::DecodeError) -> Self {
        KvError::DecodeError {
            key,
            source: Box::new(err),
        }
    }

    /// Creates a DecodeError from a payload that is not valid UTF-8.
    pub fn from_utf8_error(key: String, err: FromUtf8Error) -> Self {
        KvError::DecodeError {
            key,
            source: Box::new(err),
        }
    }

    /// Creates a ParseError from a JSON deserialization failure.
    pub fn from_json_error(what: &str, err: serde_json::Error) -> Self {
        KvError::ParseError {
            message: format!("expected {}: {}", what, err),
            source: Some(Box::new(err)),
        }
    }

    /// Returns the HTTP status if this error came from an unexpected response.
    pub fn status(&self) -> Option<u16> {
        match self {
            KvError::ProtocolError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// A specialized Result type for key/value operations.
pub type Result<T> = std::result::Result<T, KvError>;

// SPDX-License-Identifier: MIT OR Apache-2.0

//! A typed client for the Consul key/value HTTP API.
//!
//! This crate maps method calls onto the `/v1/kv/` REST endpoints of a Consul
//! agent: reads (single, recursive, key listing), writes with flags, CAS and
//! session locks, and deletes (single or by prefix). Returned payloads are
//! base64-decoded on request.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: Core types (`KvEntry`, `QueryOptions`, `PutOptions`,
//!   `ClientConfig`, `KvError`) and the `KeyValueStore` operation trait
//! - **Ports**: The `HttpTransport` trait, the seam over the HTTP client
//! - **Adapters**: `ReqwestTransport`, the blocking `reqwest` implementation
//! - **Service**: `KeyValueClient`, which turns operations into requests
//!
//! # Behaviour
//!
//! - A missing key is `Ok(None)` (or an empty list), never an error
//! - A failed CAS or lock precondition is `Ok(false)` from a put
//! - Any other unexpected status is a `KvError::ProtocolError` carrying the
//!   response body
//! - No caching, no retries: each call is exactly one round trip
//!
//! # Feature Flags
//!
//! - `http`: Enable the `reqwest` transport (default)
//! - `env`: Enable loading `ClientConfig` from `CONSUL_*` variables (default)
//! - `yaml`: Enable loading `ClientConfig` from YAML files (default)
//! - `full`: Enable all features
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use consulkv::prelude::*;
//!
//! # fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! let client = KeyValueClient::from_config(&ClientConfig::from_env()?)?;
//!
//! client.put_value("config/app/name", "billing")?;
//! let name = client.get_value_as_string("config/app/name")?;
//! assert_eq!(name.as_deref(), Some("billing"));
//!
//! for key in client.get_keys("config/app")? {
//!     println!("{}", key);
//! }
//!
//! client.delete_keys("config/app")?;
//! # Ok(())
//! # }
//! ```
//!
//! # Locking
//!
//! ```rust,no_run
//! use consulkv::prelude::*;
//!
//! # fn main() -> consulkv::domain::Result<()> {
//! # let client = KeyValueClient::builder().build()?;
//! let session = "adf4238a-882b-9ddc-4a9d-5b6758e4159e";
//! let acquired = client.put_value_with_options(
//!     "service/leader",
//!     "node-1",
//!     0,
//!     &PutOptions::new().with_acquire(session),
//! )?;
//! if acquired {
//!     // do leader work, then
//!     client.put_value_with_options(
//!         "service/leader",
//!         "node-1",
//!         0,
//!         &PutOptions::new().with_release(session),
//!     )?;
//! }
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::domain::{
        Check, ClientConfig, ConsistencyMode, KeyValueStore, KvEntry, KvError, PutOptions,
        QueryOptions, Result,
    };
    pub use crate::ports::HttpTransport;
    pub use crate::service::KeyValueClient;

    #[cfg(feature = "http")]
    pub use crate::adapters::ReqwestTransport;
}

// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core types.
//!
//! This module holds the records exchanged with the store, the option types
//! that shape requests, the client configuration and the error type. It does
//! not depend on any HTTP machinery.

pub mod check;
pub mod client_config;
pub mod errors;
pub mod kv_entry;
pub mod options;
pub mod service;

// Re-export commonly used types
pub use check::Check;
pub use client_config::ClientConfig;
pub use errors::{KvError, Result};
pub use kv_entry::KvEntry;
pub use options::{BlockingWait, ConsistencyMode, PutOptions, QueryOptions, QueryParams};
pub use service::KeyValueStore;

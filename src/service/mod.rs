// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer containing the key/value client.
//!
//! `KeyValueClient` implements the `KeyValueStore` trait on top of any
//! `HttpTransport`.

pub mod key_value_client;

// Re-export commonly used types
pub use key_value_client::KeyValueClient;
#[cfg(feature = "http")]
pub use key_value_client::KeyValueClientBuilder;

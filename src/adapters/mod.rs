// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing transport implementations.
//!
//! Each adapter implements the `HttpTransport` port on top of a concrete
//! HTTP client.

#[cfg(feature = "http")]
pub mod reqwest_transport;

#[cfg(feature = "http")]
pub use reqwest_transport::ReqwestTransport;

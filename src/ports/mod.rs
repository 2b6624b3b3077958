// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! The only port is the HTTP transport. Adapters implement it; the service
//! layer consumes it.

pub mod transport;

// Re-export commonly used types
pub use transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};

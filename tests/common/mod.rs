// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared helpers for the integration test crates.

#![allow(dead_code)]

pub mod mock_kv;

use std::sync::OnceLock;

/// Cached result of the Docker availability check.
static DOCKER_AVAILABLE: OnceLock<bool> = OnceLock::new();

/// Returns `true` if `docker ps` succeeds on this machine.
///
/// The check runs once per test binary.
pub fn is_docker_available() -> bool {
    *DOCKER_AVAILABLE.get_or_init(|| {
        std::process::Command::new("docker")
            .arg("ps")
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    })
}

/// Tells the reader why a container-backed test did nothing.
pub fn print_docker_unavailable_warning(test_name: &str) {
    eprintln!("\nSKIPPED: {} - Docker is not available", test_name);
    eprintln!("   These tests start a hashicorp/consul container and need a running Docker daemon.\n");
}

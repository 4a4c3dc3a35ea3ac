//! Integration tests for CoClean.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and run migrations
//! cargo run -p coclean-cli -- migrate
//!
//! # Start the server
//! cargo run -p coclean-web
//!
//! # Run the ignored end-to-end tests
//! cargo test -p coclean-integration-tests -- --ignored
//! ```
//!
//! The tests talk to a running server over HTTP; they are `#[ignore]`d so
//! a plain `cargo test` passes without any infrastructure.

#![cfg_attr(not(test), forbid(unsafe_code))]

use reqwest::Client;

/// Base URL for the CoClean server (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("COCLEAN_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Create an HTTP client with a cookie store, so the session survives
/// across requests within one test.
///
/// # Panics
///
/// Panics if the client cannot be constructed.
#[must_use]
#[allow(clippy::missing_panics_doc)]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// A unique suffix for test data, derived from the clock.
///
/// Keeps repeated runs from tripping over unique constraints.
#[must_use]
pub fn unique_suffix() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    format!("{nanos:x}")
}

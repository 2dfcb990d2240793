//! Integration tests for the Aurelia Jewels storefront.
//!
//! The tests drive a running storefront over HTTP and are `#[ignore]`d by
//! default.
//!
//! # Running Tests
//!
//! ```bash
//! cargo run -p aurelia-cli -- migrate
//! cargo run -p aurelia-cli -- seed products --clear
//! cargo run -p aurelia-storefront &
//! cargo test -p aurelia-integration-tests -- --ignored --test-threads=1
//! ```
//!
//! `STOREFRONT_BASE_URL` overrides the default `http://localhost:3000`.
//! Sign-in endpoints are rate limited per client IP (burst of 5), so keep the
//! number of login/signup posts per run small.

use reqwest::Client;
use reqwest::redirect::Policy;
use uuid::Uuid;

/// Base URL of the storefront under test.
#[must_use]
pub fn base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Absolute URL for `path` on the storefront under test.
#[must_use]
pub fn url(path: &str) -> String {
    format!("{}{path}", base_url())
}

/// A client with its own cookie jar that does not follow redirects.
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialized.
pub fn client() -> reqwest::Result<Client> {
    Client::builder()
        .cookie_store(true)
        .redirect(Policy::none())
        .build()
}

/// A fresh address so repeated runs never collide with existing accounts.
#[must_use]
pub fn unique_email() -> String {
    format!("it-{}@example.test", Uuid::new_v4().simple())
}

/// Password accepted by the signup rules.
pub const PASSWORD: &str = "correct horse battery";

/// `Location` header of a redirect response, if any.
#[must_use]
pub fn location(resp: &reqwest::Response) -> Option<String> {
    resp.headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}

//! Visitor session configuration.
//!
//! The visitor session (tower-sessions) stands in for browser storage: it
//! holds the cart, wishlist and order snapshot. Identity is not kept here; see
//! [`crate::services::identity`].

use tower_sessions::{Expiry, SessionManagerLayer, SessionStore};

use crate::config::StorefrontConfig;

/// Visitor session cookie name.
pub const SESSION_COOKIE_NAME: &str = "aj_visitor";

/// Session expiry time in seconds (30 days of inactivity).
const SESSION_EXPIRY_SECONDS: i64 = 30 * 24 * 60 * 60;

/// Create the session layer over any session store.
///
/// Production uses `tower_sessions_sqlx_store::PostgresStore`; the table is
/// created by `aurelia-cli migrate`.
#[must_use]
pub fn create_session_layer<S>(store: S, config: &StorefrontConfig) -> SessionManagerLayer<S>
where
    S: SessionStore + Clone,
{
    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.secure_cookies())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

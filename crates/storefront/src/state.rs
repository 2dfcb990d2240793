//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::StorefrontConfig;
use crate::services::catalog::CatalogService;
use crate::services::identity::IdentityCodec;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    pool: PgPool,
    identity: IdentityCodec,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig, pool: PgPool) -> Self {
        let identity = IdentityCodec::new(config.session_secret.clone());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                identity,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Identity cookie codec keyed by the session secret.
    #[must_use]
    pub fn identity(&self) -> &IdentityCodec {
        &self.inner.identity
    }

    /// Catalog reads bounded by the configured live-fetch timeout.
    #[must_use]
    pub fn catalog(&self) -> CatalogService<'_> {
        CatalogService::new(&self.inner.pool, self.inner.config.live_fetch_timeout)
    }
}

/// State over an unreachable database, for unit and router tests.
///
/// The pool connects lazily, so every query fails quickly and handlers take
/// their fallback paths.
#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) fn test_state() -> AppState {
    let config = crate::config::test_config();
    let pool = sqlx::postgres::PgPoolOptions::new()
        .acquire_timeout(std::time::Duration::from_millis(100))
        .connect_lazy(secrecy::ExposeSecret::expose_secret(&config.database_url))
        .unwrap();
    AppState::new(config, pool)
}

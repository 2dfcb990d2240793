//! Database migration command.
//!
//! # Environment Variables
//!
//! - `AURELIA_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! # Migration Files
//!
//! Storefront schema: `crates/storefront/migrations/`. The visitor session
//! table is owned by `tower-sessions-sqlx-store` and created by its own
//! migration.

use thiserror::Error;
use tower_sessions_sqlx_store::PostgresStore;
use tracing::info;

use aurelia_storefront::db;

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("{0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run the storefront migrations and create the session table.
///
/// # Errors
///
/// Returns an error if the database URL is missing, the connection fails or a
/// migration does not apply.
pub async fn storefront() -> Result<(), MigrationError> {
    let database_url = super::database_url().map_err(MigrationError::MissingEnvVar)?;

    info!("Connecting to storefront database...");
    let pool = db::create_pool(&database_url).await?;

    info!("Running storefront migrations...");
    sqlx::migrate!("../storefront/migrations").run(&pool).await?;

    info!("Creating session table...");
    PostgresStore::new(pool).migrate().await?;

    info!("Storefront migrations complete!");
    Ok(())
}

//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! vc-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `VOLTCART_DATABASE_URL` - `PostgreSQL` connection string
//!   (falls back to `DATABASE_URL`)
//!
//! Runs the sqlx migrations from `crates/storefront/migrations/` and then
//! the tower-sessions store migration, which owns the sessions table.

use tower_sessions_sqlx_store::PostgresStore;

use super::CommandError;

/// Run all storefront database migrations.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = super::connect().await?;

    tracing::info!("Running storefront migrations...");
    sqlx::migrate!("../storefront/migrations").run(&pool).await?;

    tracing::info!("Running session store migration...");
    PostgresStore::new(pool.clone()).migrate().await?;

    tracing::info!("Migrations complete!");
    Ok(())
}

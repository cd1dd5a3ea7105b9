//! CLI command implementations.

pub mod admin;
pub mod migrate;
pub mod seed;

use secrecy::SecretString;
use sqlx::PgPool;
use thiserror::Error;

/// Errors shared by CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration error.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Repository error from the storefront library.
    #[error("Repository error: {0}")]
    Repository(#[from] voltcart_storefront::db::RepositoryError),

    /// Authentication error from the storefront library.
    #[error("Auth error: {0}")]
    Auth(#[from] voltcart_storefront::services::AuthError),
}

/// Connect to the storefront database using the standard env vars.
pub(crate) async fn connect() -> Result<PgPool, CommandError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("VOLTCART_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| CommandError::MissingEnvVar("VOLTCART_DATABASE_URL"))?;

    tracing::info!("Connecting to storefront database...");
    let pool = voltcart_storefront::db::create_pool(&database_url).await?;

    Ok(pool)
}

//! Admin account management commands.
//!
//! # Usage
//!
//! ```bash
//! # Create a new admin account
//! vc-cli admin create -e admin@example.com -p 's3cret-pass'
//! ```
//!
//! # Environment Variables
//!
//! - `VOLTCART_DATABASE_URL` - `PostgreSQL` connection string

use voltcart_core::UserRole;
use voltcart_storefront::db::users::UserRepository;
use voltcart_storefront::services::AuthService;

use super::CommandError;

/// Create a new admin account.
///
/// Registers the account through the same credential path the API uses,
/// then promotes it to the admin role.
///
/// # Errors
///
/// Returns an error if the email is taken, the password is too weak, or
/// the database is unreachable.
pub async fn create_user(email: &str, password: &str) -> Result<i32, CommandError> {
    let pool = super::connect().await?;

    tracing::info!("Creating admin account: {email}");

    let user = AuthService::new(&pool)
        .register_with_password(email, password)
        .await?;

    let user = UserRepository::new(&pool)
        .set_role(user.id, UserRole::Admin)
        .await?;

    tracing::info!(
        "Admin account created successfully! ID: {}, Email: {}, Role: {}",
        user.id,
        user.email,
        user.role
    );

    Ok(user.id.as_i32())
}

//! User domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use voltcart_core::{Email, UserId, UserRole};

/// A storefront account.
///
/// `password_hash` never leaves the database layer; this type carries only
/// what the API may expose.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// User's email address (login identifier).
    pub email: Email,
    /// Display name.
    pub name: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Account role.
    pub role: UserRole,
    /// Whether the account is active; inactive accounts cannot log in.
    pub active: bool,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

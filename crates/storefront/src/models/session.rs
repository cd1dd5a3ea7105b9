//! Session-related types.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use voltcart_core::{Email, UserId, UserRole};

use super::User;

/// Session-stored user identity.
///
/// A snapshot of the account taken at login; all protected operations
/// resolve their `userId` from this record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    /// User's database ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// Display name.
    pub name: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Account role.
    pub role: UserRole,
    /// Whether the account was active at login.
    pub active: bool,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            phone: user.phone.clone(),
            role: user.role,
            active: user.active,
        }
    }
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";
}

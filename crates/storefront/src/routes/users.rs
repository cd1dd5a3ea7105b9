//! Account routes for the logged-in user.

use axum::{Json, extract::State};
use serde::Deserialize;
use tower_sessions::Session;

use voltcart_core::Email;

use crate::db::users::UserRepository;
use crate::error::{AppError, Result, clear_sentry_user};
use crate::middleware::{RequireUser, clear_current_user, set_current_user};
use crate::models::{CurrentUser, User};
use crate::state::AppState;

/// Request body for profile updates.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Fetch the current account.
///
/// GET /api/users/me
///
/// # Errors
///
/// Returns `AppError::NotFound` if the account was deleted out from under
/// the session.
pub async fn me(
    State(state): State<AppState>,
    RequireUser(current): RequireUser,
) -> Result<Json<User>> {
    let users = UserRepository::new(state.pool());

    let user = users
        .get_by_id(current.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_owned()))?;

    Ok(Json(user))
}

/// Update the current account's name, email, and phone.
///
/// PUT /api/users/me
///
/// # Errors
///
/// Returns `AppError::BadRequest` on malformed input, `AppError::Conflict`
/// if the new email is taken.
pub async fn update_me(
    State(state): State<AppState>,
    session: Session,
    RequireUser(current): RequireUser,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<User>> {
    validate_profile(&req)?;

    let email = Email::parse(&req.email)
        .map_err(|e| AppError::BadRequest(format!("invalid email: {e}")))?;

    let users = UserRepository::new(state.pool());
    let user = users
        .update_profile(current.id, &req.name, &email, &req.phone)
        .await?;

    // Keep the session snapshot in sync with the new profile
    set_current_user(&session, &CurrentUser::from(&user))
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;

    Ok(Json(user))
}

/// Delete the current account and end the session.
///
/// DELETE /api/users/me
///
/// # Errors
///
/// Returns `AppError::Conflict` if the account still owns addresses or
/// orders.
pub async fn delete_me(
    State(state): State<AppState>,
    session: Session,
    RequireUser(current): RequireUser,
) -> Result<Json<serde_json::Value>> {
    let users = UserRepository::new(state.pool());
    users.delete(current.id).await?;

    clear_current_user(&session)
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;
    clear_sentry_user();

    tracing::info!(user_id = %current.id, "account deleted");

    Ok(Json(serde_json::json!({ "success": true })))
}

/// Validate profile update fields.
fn validate_profile(req: &UpdateProfileRequest) -> Result<()> {
    if req.name.len() < 3 || req.name.len() > 50 {
        return Err(AppError::BadRequest(
            "name must be between 3 and 50 characters".to_owned(),
        ));
    }
    if req.phone.len() < 10 || req.phone.len() > 11 {
        return Err(AppError::BadRequest(
            "phone must be 10 or 11 digits".to_owned(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, phone: &str) -> UpdateProfileRequest {
        UpdateProfileRequest {
            name: name.to_owned(),
            email: "user@example.com".to_owned(),
            phone: phone.to_owned(),
        }
    }

    #[test]
    fn test_validate_profile_ok() {
        assert!(validate_profile(&request("Asha", "9876543210")).is_ok());
    }

    #[test]
    fn test_validate_profile_short_name() {
        assert!(validate_profile(&request("Al", "9876543210")).is_err());
    }

    #[test]
    fn test_validate_profile_bad_phone_length() {
        assert!(validate_profile(&request("Asha", "12345")).is_err());
        assert!(validate_profile(&request("Asha", "123456789012")).is_err());
    }
}

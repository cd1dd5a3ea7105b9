//! Auth routes: register, login, logout, session introspection.

use axum::{Json, extract::State};
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::middleware::{OptionalUser, clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::services::AuthService;
use crate::state::AppState;

/// Request body for registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Register a new account and start a session for it.
///
/// POST /api/auth/register
///
/// # Errors
///
/// Returns `AppError::Auth` on weak passwords, invalid emails, or a
/// duplicate account.
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<CurrentUser>> {
    let auth = AuthService::new(state.pool());

    let user = auth
        .register_with_password(&req.email, &req.password)
        .await?;

    let current = CurrentUser::from(&user);
    set_current_user(&session, &current)
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;
    set_sentry_user(&current.id, Some(current.email.as_str()));

    tracing::info!(user_id = %current.id, "account registered");

    Ok(Json(current))
}

/// Verify credentials and start a session.
///
/// POST /api/auth/login
///
/// # Errors
///
/// Returns `AppError::Auth` on invalid credentials or a disabled account.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<LoginRequest>,
) -> Result<Json<CurrentUser>> {
    let auth = AuthService::new(state.pool());

    let user = auth.login_with_password(&req.email, &req.password).await?;

    // Rotate the session id on privilege change
    session
        .cycle_id()
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;

    let current = CurrentUser::from(&user);
    set_current_user(&session, &current)
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;
    set_sentry_user(&current.id, Some(current.email.as_str()));

    Ok(Json(current))
}

/// End the current session.
///
/// POST /api/auth/logout
///
/// # Errors
///
/// Returns `AppError::Internal` if the session store fails.
pub async fn logout(session: Session) -> Result<Json<serde_json::Value>> {
    clear_current_user(&session)
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;
    clear_sentry_user();

    Ok(Json(serde_json::json!({ "success": true })))
}

/// Return the session user, or null when nobody is logged in.
///
/// GET /api/auth/session
pub async fn session(OptionalUser(user): OptionalUser) -> Json<Option<CurrentUser>> {
    Json(user)
}

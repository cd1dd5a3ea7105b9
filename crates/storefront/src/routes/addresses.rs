//! Saved-address routes.
//!
//! Address creation reverse-geocodes the supplied coordinates before
//! persisting; the primary-address invariant is maintained transactionally
//! by the repository.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use voltcart_core::AddressId;

use crate::db::addresses::{AddressRepository, NewAddress};
use crate::error::{AppError, Result};
use crate::middleware::RequireUser;
use crate::models::SavedAddress;
use crate::services::geocoding::ResolvedLocation;
use crate::state::AppState;

/// Request body for saving an address.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAddressRequest {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub receiver_name: Option<String>,
    pub address_nickname: String,
    pub receiver_phone: String,
    pub zip_code: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
}

/// List the user's saved addresses.
///
/// GET /api/addresses
///
/// # Errors
///
/// Returns `AppError::Database` if the query fails.
pub async fn index(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<Vec<SavedAddress>>> {
    let addresses = AddressRepository::new(state.pool())
        .list_for_user(user.id)
        .await?;

    Ok(Json(addresses))
}

/// Save an address for the user.
///
/// POST /api/addresses
///
/// When coordinates are supplied, the location is resolved synchronously
/// before anything is written; a failed lookup creates no row.
///
/// # Errors
///
/// Returns `AppError::Conflict` if the user already has an address with
/// this nickname, `AppError::Geocoding` if the lookup fails.
pub async fn create(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(req): Json<CreateAddressRequest>,
) -> Result<Json<SavedAddress>> {
    if req.address_nickname.trim().is_empty() {
        return Err(AppError::BadRequest("address nickname is required".to_owned()));
    }
    if req.receiver_phone.trim().is_empty() {
        return Err(AppError::BadRequest("receiver phone is required".to_owned()));
    }

    let location = match (req.latitude, req.longitude) {
        (Some(latitude), Some(longitude)) => {
            state.geocoder().reverse_geocode(latitude, longitude).await?
        }
        _ => ResolvedLocation::unknown(),
    };

    let address = AddressRepository::new(state.pool())
        .create(NewAddress {
            user_id: user.id,
            latitude: req.latitude,
            longitude: req.longitude,
            receiver_name: req.receiver_name,
            address_nickname: req.address_nickname,
            receiver_phone: req.receiver_phone,
            city: location.city,
            state: location.state,
            country: location.country,
            zip_code: req.zip_code,
            is_primary: req.is_primary,
        })
        .await?;

    Ok(Json(address))
}

/// Make an address the user's primary shipping destination.
///
/// POST /api/addresses/{id}/primary
///
/// # Errors
///
/// Returns `AppError::NotFound` if the address doesn't exist or belongs to
/// another user; other users' addresses are never touched.
pub async fn mark_primary(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<AddressId>,
) -> Result<Json<SavedAddress>> {
    let address = AddressRepository::new(state.pool())
        .mark_primary(user.id, id)
        .await
        .map_err(|e| match e {
            crate::db::RepositoryError::NotFound => {
                AppError::NotFound("Address not found".to_owned())
            }
            other => other.into(),
        })?;

    Ok(Json(address))
}

/// Delete one of the user's addresses.
///
/// DELETE /api/addresses/{id}
///
/// # Errors
///
/// Returns `AppError::NotFound` if the address doesn't exist or belongs to
/// another user, `AppError::Conflict` if orders still reference it.
pub async fn destroy(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<AddressId>,
) -> Result<Json<serde_json::Value>> {
    AddressRepository::new(state.pool())
        .delete(id, user.id)
        .await
        .map_err(|e| match e {
            crate::db::RepositoryError::NotFound => {
                AppError::NotFound("Address not found".to_owned())
            }
            other => other.into(),
        })?;

    Ok(Json(serde_json::json!({ "success": true })))
}

//! Saved-address domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use voltcart_core::{AddressId, UserId};

/// A saved shipping address.
///
/// `city`/`state`/`country` are derived once at creation time via reverse
/// geocoding; rows created without coordinates keep the "Unknown ..."
/// defaults.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SavedAddress {
    /// Unique address ID.
    pub id: AddressId,
    /// Owning user.
    pub user_id: UserId,
    /// Latitude supplied by the address picker, if any.
    pub latitude: Option<f64>,
    /// Longitude supplied by the address picker, if any.
    pub longitude: Option<f64>,
    /// Name of the person receiving deliveries here.
    pub receiver_name: Option<String>,
    /// User-chosen label, unique per user ("Home", "Office").
    pub address_nickname: String,
    /// Contact phone for the receiver.
    pub receiver_phone: String,
    /// Geocoded city, or "Unknown City".
    pub city: String,
    /// Geocoded state, or "Unknown State".
    pub state: String,
    /// Geocoded country, or "Unknown Country".
    pub country: String,
    /// Postal code.
    pub zip_code: Option<String>,
    /// Whether this is the user's default shipping destination.
    pub is_primary: bool,
    /// When the address was saved.
    pub created_at: DateTime<Utc>,
}

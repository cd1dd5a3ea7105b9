//! Product catalog domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use voltcart_core::{ProductCategory, ProductId};

/// A catalog product.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price in the store currency.
    pub price: Decimal,
    /// Catalog category.
    pub category: ProductCategory,
    /// Marketing description.
    pub description: String,
    /// Image URL.
    pub image: String,
    /// Average rating, 0 to 5.
    pub rating: f64,
    /// Units in stock. Not decremented by order placement.
    pub quantity: i32,
    /// When the product was added to the catalog.
    pub created_at: DateTime<Utc>,
}

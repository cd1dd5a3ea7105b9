//! Order domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use voltcart_core::{AddressId, OrderId, OrderItemId, OrderStatus, ProductId, UserId};

use super::{Product, SavedAddress};

/// A placed order.
///
/// Created once at checkout; mutated only for status changes and the
/// derived `archived` flag.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// Owning user.
    pub user_id: UserId,
    /// Shipping destination chosen at checkout.
    pub shipping_address_id: AddressId,
    /// Fulfillment status.
    pub status: OrderStatus,
    /// True once every line item of this order is archived.
    pub archived: bool,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
}

/// A line item of an order.
///
/// Created in bulk at order placement; only the `archived` flag is ever
/// updated afterwards.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Unique item ID.
    pub id: OrderItemId,
    /// Order this item belongs to.
    pub order_id: OrderId,
    /// Product ordered.
    pub product_id: ProductId,
    /// Units ordered.
    pub quantity: i32,
    /// Whether this item is hidden from the active order list.
    pub archived: bool,
}

/// A line item joined with its product.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemWithProduct {
    /// The line item.
    #[serde(flatten)]
    pub item: OrderItem,
    /// The ordered product.
    pub product: Product,
}

/// An order with its items and shipping address, as served by the history
/// endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderWithDetails {
    /// The order.
    #[serde(flatten)]
    pub order: Order,
    /// Line items, filtered per endpoint (active vs archived views).
    pub items: Vec<OrderItemWithProduct>,
    /// The shipping address, when still present.
    pub shipping_address: Option<SavedAddress>,
}

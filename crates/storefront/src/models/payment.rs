//! Payment-gateway mirror domain types.
//!
//! These rows track gateway-side records locally so webhook callbacks can
//! be reconciled. They are weakly linked to orders and users by id value,
//! not by referential ownership.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use voltcart_core::{GatewayOrderId, GatewayOrderStatus, GatewayPaymentId, OrderId, PaymentStatus, UserId};

/// A gateway order mirrored locally.
///
/// `razorpay_id` is an empty placeholder until the gateway order is
/// actually created out-of-band.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct GatewayOrder {
    /// Local row ID.
    pub id: GatewayOrderId,
    /// Gateway-assigned order id, or "" pre-gateway.
    pub razorpay_id: String,
    /// Amount in the store currency's standard unit.
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Gateway order status.
    pub status: GatewayOrderStatus,
    /// User the order was created for (weak link).
    pub user_id: UserId,
    /// Storefront order being paid for, if known (weak link).
    pub order_id: Option<OrderId>,
    /// When the mirror row was created.
    pub created_at: DateTime<Utc>,
}

/// A gateway payment mirrored locally.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct GatewayPayment {
    /// Local row ID.
    pub id: GatewayPaymentId,
    /// Gateway-assigned payment id.
    pub razorpay_id: String,
    /// Amount in the store currency's standard unit; 0 when the webhook
    /// created the row without amount details.
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Payment status.
    pub status: PaymentStatus,
    /// Gateway order id this payment belongs to (weak link).
    pub order_id: String,
    /// When the mirror row was created.
    pub created_at: DateTime<Utc>,
}

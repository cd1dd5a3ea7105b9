//! Payment routes: gateway-order mirroring and status reconciliation.

use axum::{
    Json,
    extract::{Path, State},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use voltcart_core::{
    CurrencyCode, GatewayOrderId, GatewayOrderStatus, OrderId, PaymentStatus, Price,
};

use crate::db::payments::PaymentRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireUser;
use crate::models::{GatewayOrder, GatewayPayment};
use crate::state::AppState;

/// Request body for creating a gateway-order record.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub amount: Decimal,
    pub currency: CurrencyCode,
    pub order_id: Option<OrderId>,
}

/// Request body for upserting a gateway order's status.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderStatusRequest {
    pub razorpay_id: String,
    pub status: GatewayOrderStatus,
}

/// Request body for upserting a payment's status.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePaymentStatusRequest {
    pub razorpay_id: String,
    pub status: PaymentStatus,
}

/// Response for gateway order creation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGatewayOrderResponse {
    pub order_id: String,
}

/// Persist a local gateway-order row ahead of the gateway call.
///
/// POST /api/payments/orders
///
/// The row carries an empty gateway id until
/// [`create_gateway_order`] records the real one.
///
/// # Errors
///
/// Returns `AppError::BadRequest` on a non-positive amount.
pub async fn create_order(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(req): Json<CreateOrderRequest>,
) -> Result<Json<GatewayOrder>> {
    validate_amount(req.amount)?;

    let order = PaymentRepository::new(state.pool())
        .create_local_order(user.id, req.amount, req.currency.as_str(), req.order_id)
        .await?;

    Ok(Json(order))
}

/// Create an order at the gateway and mirror it locally.
///
/// POST /api/payments/gateway/orders
///
/// # Errors
///
/// Returns `AppError::Gateway` if the gateway call fails; nothing is
/// mirrored in that case.
pub async fn create_gateway_order(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(req): Json<CreateOrderRequest>,
) -> Result<Json<CreateGatewayOrderResponse>> {
    validate_amount(req.amount)?;

    let receipt = req.order_id.map(|id| id.to_string());
    let razorpay_id = state
        .razorpay()
        .create_order(Price::new(req.amount, req.currency), receipt.as_deref())
        .await?;

    PaymentRepository::new(state.pool())
        .record_gateway_order(
            user.id,
            req.amount,
            req.currency.as_str(),
            &razorpay_id,
            req.order_id,
        )
        .await?;

    tracing::info!(user_id = %user.id, razorpay_id = %razorpay_id, "gateway order created");

    Ok(Json(CreateGatewayOrderResponse {
        order_id: razorpay_id,
    }))
}

/// Upsert a gateway order's status by gateway id.
///
/// POST /api/payments/orders/status
///
/// # Errors
///
/// Returns `AppError::Database` if the upsert fails.
pub async fn update_order_status(
    State(state): State<AppState>,
    RequireUser(_user): RequireUser,
    Json(req): Json<UpdateOrderStatusRequest>,
) -> Result<Json<GatewayOrder>> {
    let order = PaymentRepository::new(state.pool())
        .upsert_order_status(&req.razorpay_id, req.status)
        .await?;

    Ok(Json(order))
}

/// Upsert a payment's status by gateway id.
///
/// POST /api/payments/status
///
/// # Errors
///
/// Returns `AppError::Database` if the upsert fails.
pub async fn update_payment_status(
    State(state): State<AppState>,
    RequireUser(_user): RequireUser,
    Json(req): Json<UpdatePaymentStatusRequest>,
) -> Result<Json<GatewayPayment>> {
    let payment = PaymentRepository::new(state.pool())
        .upsert_payment_status(&req.razorpay_id, req.status, "")
        .await?;

    Ok(Json(payment))
}

/// Fetch one gateway order by local row id.
///
/// GET /api/payments/orders/{id}
///
/// # Errors
///
/// Returns `AppError::NotFound` if the row doesn't exist.
pub async fn show_order(
    State(state): State<AppState>,
    RequireUser(_user): RequireUser,
    Path(id): Path<GatewayOrderId>,
) -> Result<Json<GatewayOrder>> {
    let order = PaymentRepository::new(state.pool())
        .get_order(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Razorpay order not found".to_owned()))?;

    Ok(Json(order))
}

/// List the user's gateway orders.
///
/// GET /api/payments/orders
///
/// # Errors
///
/// Returns `AppError::Database` if the query fails.
pub async fn user_orders(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<Vec<GatewayOrder>>> {
    let orders = PaymentRepository::new(state.pool())
        .list_orders_for_user(user.id)
        .await?;

    Ok(Json(orders))
}

/// List the payments recorded against a gateway order.
///
/// GET /api/payments/by-order/{gateway_order_id}
///
/// # Errors
///
/// Returns `AppError::Database` if the query fails.
pub async fn for_order(
    State(state): State<AppState>,
    RequireUser(_user): RequireUser,
    Path(gateway_order_id): Path<String>,
) -> Result<Json<Vec<GatewayPayment>>> {
    let payments = PaymentRepository::new(state.pool())
        .list_payments_for_order(&gateway_order_id)
        .await?;

    Ok(Json(payments))
}

/// Reject non-positive amounts before they reach the gateway.
fn validate_amount(amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(AppError::BadRequest("amount must be positive".to_owned()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_amount_rejects_zero_and_negative() {
        assert!(validate_amount(Decimal::ZERO).is_err());
        assert!(validate_amount(Decimal::new(-100, 2)).is_err());
        assert!(validate_amount(Decimal::new(100, 2)).is_ok());
    }
}

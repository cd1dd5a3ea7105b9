//! Order routes: placement, history views, and item archival.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use voltcart_core::{AddressId, OrderId, OrderItemId, ProductId};

use crate::db::RepositoryError;
use crate::db::addresses::AddressRepository;
use crate::db::orders::{OrderLine, OrderRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireUser;
use crate::models::{Order, OrderItem, OrderItemWithProduct, OrderWithDetails};
use crate::state::AppState;

/// One cart line in a placement request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineRequest {
    pub product_id: ProductId,
    pub quantity: i32,
}

/// Request body for order placement.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub items: Vec<OrderLineRequest>,
    pub shipping_address_id: AddressId,
}

/// Response for order placement.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderResponse {
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// Request body for the archive toggle.
#[derive(Debug, Deserialize)]
pub struct ArchiveItemRequest {
    /// The item's current flag as the client sees it; the stored flag is
    /// set to its inverse.
    pub archived: bool,
}

/// Place an order from a cart snapshot.
///
/// POST /api/orders
///
/// The order row and every line item are written in one transaction; any
/// missing product fails the whole placement and leaves no residue.
///
/// # Errors
///
/// Returns `AppError::BadRequest` on an empty cart or non-positive
/// quantities, `AppError::NotFound` for a missing address or product.
pub async fn create(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(req): Json<CreateOrderRequest>,
) -> Result<Json<CreateOrderResponse>> {
    if req.items.is_empty() {
        return Err(AppError::BadRequest("order must contain at least one item".to_owned()));
    }
    if req.items.iter().any(|line| line.quantity < 1) {
        return Err(AppError::BadRequest("item quantity must be at least 1".to_owned()));
    }

    // The shipping address must exist and belong to the buyer
    AddressRepository::new(state.pool())
        .get_owned(req.shipping_address_id, user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Shipping address not found".to_owned()))?;

    let lines: Vec<OrderLine> = req
        .items
        .iter()
        .map(|line| OrderLine {
            product_id: line.product_id,
            quantity: line.quantity,
        })
        .collect();

    let (order, items) = OrderRepository::new(state.pool())
        .create(user.id, req.shipping_address_id, &lines)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound("Product not found".to_owned()),
            other => other.into(),
        })?;

    tracing::info!(order_id = %order.id, user_id = %user.id, items = items.len(), "order placed");

    Ok(Json(CreateOrderResponse { order, items }))
}

/// List the user's active orders with unarchived items.
///
/// GET /api/orders
///
/// # Errors
///
/// Returns `AppError::Database` if a query fails.
pub async fn index(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<Vec<OrderWithDetails>>> {
    let orders = OrderRepository::new(state.pool())
        .list_for_user(user.id)
        .await?;

    Ok(Json(orders))
}

/// List the user's orders with their archived items.
///
/// GET /api/orders/archived
///
/// # Errors
///
/// Returns `AppError::Database` if a query fails.
pub async fn archived(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<Vec<OrderWithDetails>>> {
    let orders = OrderRepository::new(state.pool())
        .list_archived_for_user(user.id)
        .await?;

    Ok(Json(orders))
}

/// Fetch one of the user's orders with all of its items.
///
/// GET /api/orders/{id}
///
/// # Errors
///
/// Returns `AppError::NotFound` if the order doesn't exist or belongs to
/// another user.
pub async fn show(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<OrderId>,
) -> Result<Json<OrderWithDetails>> {
    let order = OrderRepository::new(state.pool())
        .get_with_items(id)
        .await?
        .filter(|o| o.order.user_id == user.id)
        .ok_or_else(|| AppError::NotFound("Order not found".to_owned()))?;

    Ok(Json(order))
}

/// List one order's items.
///
/// GET /api/orders/{id}/items
///
/// # Errors
///
/// Returns `AppError::NotFound` if the order doesn't exist or belongs to
/// another user.
pub async fn items(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<OrderId>,
) -> Result<Json<Vec<OrderItemWithProduct>>> {
    let repo = OrderRepository::new(state.pool());

    repo.get_with_items(id)
        .await?
        .filter(|o| o.order.user_id == user.id)
        .ok_or_else(|| AppError::NotFound("Order not found".to_owned()))?;

    let items = repo.items_for_order(id).await?;

    Ok(Json(items))
}

/// List every item across the user's orders.
///
/// GET /api/orders/items
///
/// # Errors
///
/// Returns `AppError::Database` if a query fails.
pub async fn user_items(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<Vec<OrderItemWithProduct>>> {
    let items = OrderRepository::new(state.pool())
        .items_for_user(user.id)
        .await?;

    Ok(Json(items))
}

/// Toggle an item's archived flag and recompute the order's.
///
/// POST /api/orders/items/{id}/archive
///
/// The stored flag becomes the inverse of the submitted one. Once every
/// item of the order is archived the order itself is; un-archiving any
/// item brings the order back.
///
/// # Errors
///
/// Returns `AppError::NotFound` if the item doesn't exist or belongs to
/// another user's order.
pub async fn archive_item(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<OrderItemId>,
    Json(req): Json<ArchiveItemRequest>,
) -> Result<Json<OrderItem>> {
    let item = OrderRepository::new(state.pool())
        .set_item_archived(user.id, id, !req.archived)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound("Order item not found".to_owned()),
            other => other.into(),
        })?;

    Ok(Json(item))
}

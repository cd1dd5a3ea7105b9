//! Admin dashboard routes: catalog management and order oversight.
//!
//! Every handler requires the admin role via [`RequireAdmin`].

use axum::{
    Json,
    extract::{Path, State},
};
use rust_decimal::Decimal;
use serde::Deserialize;

use voltcart_core::{OrderId, OrderStatus, ProductCategory, ProductId};

use crate::db::RepositoryError;
use crate::db::orders::OrderRepository;
use crate::db::products::{NewProduct, ProductRepository};
use crate::db::users::UserRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::{Order, OrderWithDetails, Product, User};
use crate::state::AppState;

/// Request body for creating or replacing a product.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    pub name: String,
    pub price: Decimal,
    pub category: ProductCategory,
    pub description: String,
    pub image: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub quantity: i32,
}

/// Request body for updating an order's fulfillment status.
#[derive(Debug, Deserialize)]
pub struct OrderStatusRequest {
    pub status: OrderStatus,
}

/// List all accounts.
///
/// GET /api/admin/users
///
/// # Errors
///
/// Returns `AppError::Database` if the query fails.
pub async fn users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<User>>> {
    let users = UserRepository::new(state.pool()).list().await?;

    Ok(Json(users))
}

/// List every order in the store.
///
/// GET /api/admin/orders
///
/// # Errors
///
/// Returns `AppError::Database` if the query fails.
pub async fn orders(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<OrderWithDetails>>> {
    let orders = OrderRepository::new(state.pool()).list_all().await?;

    Ok(Json(orders))
}

/// Update an order's fulfillment status.
///
/// POST /api/admin/orders/{id}/status
///
/// # Errors
///
/// Returns `AppError::NotFound` if the order doesn't exist.
pub async fn update_order_status(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<OrderId>,
    Json(req): Json<OrderStatusRequest>,
) -> Result<Json<Order>> {
    let order = OrderRepository::new(state.pool())
        .set_status(id, req.status)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound("Order not found".to_owned()),
            other => other.into(),
        })?;

    tracing::info!(order_id = %id, status = %req.status, admin = %admin.id, "order status updated");

    Ok(Json(order))
}

/// Add a product to the catalog.
///
/// POST /api/admin/products
///
/// # Errors
///
/// Returns `AppError::BadRequest` on invalid fields.
pub async fn create_product(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(req): Json<ProductRequest>,
) -> Result<Json<Product>> {
    validate_product(&req)?;

    let product = ProductRepository::new(state.pool())
        .create(new_product(req))
        .await?;

    Ok(Json(product))
}

/// Replace a product's attributes.
///
/// PUT /api/admin/products/{id}
///
/// # Errors
///
/// Returns `AppError::NotFound` if the product doesn't exist,
/// `AppError::BadRequest` on invalid fields.
pub async fn update_product(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<ProductId>,
    Json(req): Json<ProductRequest>,
) -> Result<Json<Product>> {
    validate_product(&req)?;

    let product = ProductRepository::new(state.pool())
        .update(id, new_product(req))
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound("Product not found".to_owned()),
            other => other.into(),
        })?;

    Ok(Json(product))
}

/// Remove a product from the catalog.
///
/// DELETE /api/admin/products/{id}
///
/// # Errors
///
/// Returns `AppError::NotFound` if the product doesn't exist,
/// `AppError::Conflict` if order items still reference it.
pub async fn delete_product(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<ProductId>,
) -> Result<Json<serde_json::Value>> {
    ProductRepository::new(state.pool())
        .delete(id)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound("Product not found".to_owned()),
            other => other.into(),
        })?;

    Ok(Json(serde_json::json!({ "success": true })))
}

/// Validate product fields.
fn validate_product(req: &ProductRequest) -> Result<()> {
    if req.name.len() < 3 {
        return Err(AppError::BadRequest(
            "product name must be at least 3 characters".to_owned(),
        ));
    }
    if req.price < Decimal::ZERO {
        return Err(AppError::BadRequest("price must not be negative".to_owned()));
    }
    if !(0.0..=5.0).contains(&req.rating) {
        return Err(AppError::BadRequest("rating must be between 0 and 5".to_owned()));
    }
    if req.quantity < 0 {
        return Err(AppError::BadRequest("quantity must not be negative".to_owned()));
    }
    Ok(())
}

fn new_product(req: ProductRequest) -> NewProduct {
    NewProduct {
        name: req.name,
        price: req.price,
        category: req.category,
        description: req.description,
        image: req.image,
        rating: req.rating,
        quantity: req.quantity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, price: Decimal, rating: f64) -> ProductRequest {
        ProductRequest {
            name: name.to_owned(),
            price,
            category: ProductCategory::Wires,
            description: "Copper wire".to_owned(),
            image: "https://cdn.example.com/wire.webp".to_owned(),
            rating,
            quantity: 10,
        }
    }

    #[test]
    fn test_validate_product_ok() {
        assert!(validate_product(&request("Wire", Decimal::new(4999, 2), 4.5)).is_ok());
    }

    #[test]
    fn test_validate_product_short_name() {
        assert!(validate_product(&request("W", Decimal::ONE, 4.5)).is_err());
    }

    #[test]
    fn test_validate_product_negative_price() {
        assert!(validate_product(&request("Wire", Decimal::new(-1, 0), 4.5)).is_err());
    }

    #[test]
    fn test_validate_product_rating_out_of_range() {
        assert!(validate_product(&request("Wire", Decimal::ONE, 5.5)).is_err());
    }
}

//! Catalog routes.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use voltcart_core::{ProductCategory, ProductId};

use crate::db::products::ProductRepository;
use crate::error::{AppError, Result};
use crate::models::Product;
use crate::state::AppState;

/// Query parameters for the product listing.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub category: Option<ProductCategory>,
}

/// List catalog products, optionally filtered by category.
///
/// GET /api/products?category=WIRES
///
/// # Errors
///
/// Returns `AppError::Database` if the query fails.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Product>>> {
    let products = ProductRepository::new(state.pool())
        .list(query.category)
        .await?;

    Ok(Json(products))
}

/// Fetch one product.
///
/// GET /api/products/{id}
///
/// # Errors
///
/// Returns `AppError::NotFound` if the product doesn't exist.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>> {
    let product = ProductRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_owned()))?;

    Ok(Json(product))
}

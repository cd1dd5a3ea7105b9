//! Product catalog repository.

use rust_decimal::Decimal;
use sqlx::PgPool;

use voltcart_core::{ProductCategory, ProductId};

use super::RepositoryError;
use crate::models::Product;

/// Input for creating or replacing a catalog product (admin flows).
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub price: Decimal,
    pub category: ProductCategory,
    pub description: String,
    pub image: String,
    pub rating: f64,
    pub quantity: i32,
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List catalog products, optionally filtered by category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        category: Option<ProductCategory>,
    ) -> Result<Vec<Product>, RepositoryError> {
        let products = match category {
            Some(category) => {
                sqlx::query_as::<_, Product>(
                    "SELECT * FROM products WHERE category = $1 ORDER BY name ASC",
                )
                .bind(category)
                .fetch_all(self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Product>("SELECT * FROM products ORDER BY name ASC")
                    .fetch_all(self.pool)
                    .await?
            }
        };

        Ok(products)
    }

    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(product)
    }

    /// Create a catalog product. Admin use only.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, new: NewProduct) -> Result<Product, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(
            "INSERT INTO products (name, price, category, description, image, rating, quantity)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING *",
        )
        .bind(&new.name)
        .bind(new.price)
        .bind(new.category)
        .bind(&new.description)
        .bind(&new.image)
        .bind(new.rating)
        .bind(new.quantity)
        .fetch_one(self.pool)
        .await?;

        Ok(product)
    }

    /// Replace a catalog product's attributes. Admin use only.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(&self, id: ProductId, new: NewProduct) -> Result<Product, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(
            "UPDATE products
             SET name = $2, price = $3, category = $4, description = $5,
                 image = $6, rating = $7, quantity = $8
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(&new.name)
        .bind(new.price)
        .bind(new.category)
        .bind(&new.description)
        .bind(&new.image)
        .bind(new.rating)
        .bind(new.quantity)
        .fetch_optional(self.pool)
        .await?;

        product.ok_or(RepositoryError::NotFound)
    }

    /// Delete a catalog product. Admin use only.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Conflict` if order items still reference
    /// the product.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.is_foreign_key_violation()
                {
                    return RepositoryError::Conflict(
                        "product is referenced by existing orders".to_owned(),
                    );
                }
                RepositoryError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

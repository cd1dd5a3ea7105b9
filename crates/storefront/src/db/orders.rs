//! Order repository: placement, history views, and item archival.
//!
//! Order placement is a single unit of work: the order row and every line
//! item are inserted in one transaction, so a missing product rolls the
//! whole placement back and leaves no residue.

use std::collections::HashMap;

use sqlx::PgPool;

use voltcart_core::{AddressId, OrderId, OrderItemId, OrderStatus, ProductId, UserId};

use super::RepositoryError;
use crate::models::{Order, OrderItem, OrderItemWithProduct, OrderWithDetails, Product, SavedAddress};

/// One requested line of an order placement.
#[derive(Debug, Clone, Copy)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: i32,
}

/// Which item rows a history view includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemView {
    /// Unarchived items only (active order list).
    Active,
    /// Archived items only (archived order list).
    Archived,
    /// Every item (single-order detail view).
    All,
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Place an order: one order row plus one item row per line, atomically.
    ///
    /// The caller is expected to have resolved the shipping address already.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if any line references a missing
    /// product; nothing is persisted in that case.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        user_id: UserId,
        shipping_address_id: AddressId,
        lines: &[OrderLine],
    ) -> Result<(Order, Vec<OrderItem>), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let order = sqlx::query_as::<_, Order>(
            "INSERT INTO orders (user_id, shipping_address_id)
             VALUES ($1, $2)
             RETURNING *",
        )
        .bind(user_id)
        .bind(shipping_address_id)
        .fetch_one(&mut *tx)
        .await?;

        let mut items = Vec::with_capacity(lines.len());
        for line in lines {
            // The product must still exist at placement time; a dropped
            // transaction rolls back the order and any items inserted so far.
            let exists = sqlx::query_scalar::<_, i32>("SELECT id FROM products WHERE id = $1")
                .bind(line.product_id)
                .fetch_optional(&mut *tx)
                .await?;

            if exists.is_none() {
                return Err(RepositoryError::NotFound);
            }

            let item = sqlx::query_as::<_, OrderItem>(
                "INSERT INTO order_items (order_id, product_id, quantity)
                 VALUES ($1, $2, $3)
                 RETURNING *",
            )
            .bind(order.id)
            .bind(line.product_id)
            .bind(line.quantity)
            .fetch_one(&mut *tx)
            .await?;

            items.push(item);
        }

        tx.commit().await?;

        Ok((order, items))
    }

    /// List a user's active orders (newest first) with unarchived items,
    /// products, and shipping addresses.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<OrderWithDetails>, RepositoryError> {
        let orders = sqlx::query_as::<_, Order>(
            "SELECT * FROM orders
             WHERE user_id = $1 AND archived = FALSE
             ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        self.attach_details(orders, ItemView::Active).await
    }

    /// List all of a user's orders with their archived items.
    ///
    /// Matches the active view's shape; orders whose items are all still
    /// active appear with an empty item list.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list_archived_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<OrderWithDetails>, RepositoryError> {
        let orders = sqlx::query_as::<_, Order>(
            "SELECT * FROM orders WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        self.attach_details(orders, ItemView::Archived).await
    }

    /// List every order in the store, newest first. Admin use only.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list_all(&self) -> Result<Vec<OrderWithDetails>, RepositoryError> {
        let orders = sqlx::query_as::<_, Order>("SELECT * FROM orders ORDER BY created_at DESC")
            .fetch_all(self.pool)
            .await?;

        self.attach_details(orders, ItemView::All).await
    }

    /// Get one order with all of its items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get_with_items(
        &self,
        id: OrderId,
    ) -> Result<Option<OrderWithDetails>, RepositoryError> {
        let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        let Some(order) = order else {
            return Ok(None);
        };

        let mut detailed = self.attach_details(vec![order], ItemView::All).await?;
        Ok(detailed.pop())
    }

    /// List one order's items with their products.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn items_for_order(
        &self,
        order_id: OrderId,
    ) -> Result<Vec<OrderItemWithProduct>, RepositoryError> {
        let items = sqlx::query_as::<_, OrderItem>(
            "SELECT * FROM order_items WHERE order_id = $1 ORDER BY id ASC",
        )
        .bind(order_id)
        .fetch_all(self.pool)
        .await?;

        self.join_products(items).await
    }

    /// List every item across all of a user's orders.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn items_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<OrderItemWithProduct>, RepositoryError> {
        let items = sqlx::query_as::<_, OrderItem>(
            "SELECT oi.* FROM order_items oi
             JOIN orders o ON o.id = oi.order_id
             WHERE o.user_id = $1
             ORDER BY oi.id ASC",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        self.join_products(items).await
    }

    /// Set an item's archived flag and recompute the owning order's.
    ///
    /// The order is archived exactly when every one of its items is. Flag
    /// write and recompute run in one transaction so the order flag never
    /// observes a torn state. The item must belong to one of `user_id`'s
    /// orders.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item doesn't exist or
    /// belongs to another user's order.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn set_item_archived(
        &self,
        user_id: UserId,
        item_id: OrderItemId,
        archived: bool,
    ) -> Result<OrderItem, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let item = sqlx::query_as::<_, OrderItem>(
            "UPDATE order_items oi SET archived = $2
             FROM orders o
             WHERE oi.id = $1 AND o.id = oi.order_id AND o.user_id = $3
             RETURNING oi.*",
        )
        .bind(item_id)
        .bind(archived)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        let sibling_flags =
            sqlx::query_scalar::<_, bool>("SELECT archived FROM order_items WHERE order_id = $1")
                .bind(item.order_id)
                .fetch_all(&mut *tx)
                .await?;

        let order_archived = sibling_flags.iter().all(|a| *a);

        sqlx::query("UPDATE orders SET archived = $2 WHERE id = $1")
            .bind(item.order_id)
            .bind(order_archived)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(item)
    }

    /// Update an order's fulfillment status. Admin use only.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn set_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, RepositoryError> {
        let order = sqlx::query_as::<_, Order>(
            "UPDATE orders SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(self.pool)
        .await?;

        order.ok_or(RepositoryError::NotFound)
    }

    /// Fetch items (per view), products, and addresses for a set of orders
    /// and stitch them into detail records.
    async fn attach_details(
        &self,
        orders: Vec<Order>,
        view: ItemView,
    ) -> Result<Vec<OrderWithDetails>, RepositoryError> {
        if orders.is_empty() {
            return Ok(Vec::new());
        }

        let order_ids: Vec<i32> = orders.iter().map(|o| o.id.as_i32()).collect();

        let items = match view {
            ItemView::Active | ItemView::Archived => {
                sqlx::query_as::<_, OrderItem>(
                    "SELECT * FROM order_items
                     WHERE order_id = ANY($1) AND archived = $2
                     ORDER BY id ASC",
                )
                .bind(&order_ids)
                .bind(view == ItemView::Archived)
                .fetch_all(self.pool)
                .await?
            }
            ItemView::All => {
                sqlx::query_as::<_, OrderItem>(
                    "SELECT * FROM order_items WHERE order_id = ANY($1) ORDER BY id ASC",
                )
                .bind(&order_ids)
                .fetch_all(self.pool)
                .await?
            }
        };

        let address_ids: Vec<i32> = orders
            .iter()
            .map(|o| o.shipping_address_id.as_i32())
            .collect();
        let addresses = sqlx::query_as::<_, SavedAddress>(
            "SELECT * FROM saved_addresses WHERE id = ANY($1)",
        )
        .bind(&address_ids)
        .fetch_all(self.pool)
        .await?;
        let mut addresses: HashMap<AddressId, SavedAddress> =
            addresses.into_iter().map(|a| (a.id, a)).collect();

        let items = self.join_products(items).await?;
        let mut items_by_order: HashMap<OrderId, Vec<OrderItemWithProduct>> = HashMap::new();
        for item in items {
            items_by_order
                .entry(item.item.order_id)
                .or_default()
                .push(item);
        }

        Ok(orders
            .into_iter()
            .map(|order| OrderWithDetails {
                items: items_by_order.remove(&order.id).unwrap_or_default(),
                shipping_address: addresses.remove(&order.shipping_address_id),
                order,
            })
            .collect())
    }

    /// Join items with their products.
    async fn join_products(
        &self,
        items: Vec<OrderItem>,
    ) -> Result<Vec<OrderItemWithProduct>, RepositoryError> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let product_ids: Vec<i32> = items.iter().map(|i| i.product_id.as_i32()).collect();
        let products =
            sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = ANY($1)")
                .bind(&product_ids)
                .fetch_all(self.pool)
                .await?;
        let products: HashMap<ProductId, Product> =
            products.into_iter().map(|p| (p.id, p)).collect();

        items
            .into_iter()
            .map(|item| {
                let product = products.get(&item.product_id).cloned().ok_or_else(|| {
                    RepositoryError::DataCorruption(format!(
                        "order item {} references missing product {}",
                        item.id, item.product_id
                    ))
                })?;
                Ok(OrderItemWithProduct { item, product })
            })
            .collect()
    }
}

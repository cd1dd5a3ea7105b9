//! Payment-gateway mirror repository.
//!
//! Status updates are idempotent upserts keyed on the gateway-assigned id:
//! update the row if it exists, otherwise create it with zeroed placeholder
//! amount/currency so a webhook arriving before the local record still
//! lands somewhere reconcilable.

use rust_decimal::Decimal;
use sqlx::PgPool;

use voltcart_core::{GatewayOrderId, GatewayOrderStatus, OrderId, PaymentStatus, UserId};

use super::RepositoryError;
use crate::models::{GatewayOrder, GatewayPayment};

/// Repository for payment-gateway mirror records.
pub struct PaymentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PaymentRepository<'a> {
    /// Create a new payment repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Persist a local gateway-order row.
    ///
    /// `razorpay_id` is empty until the gateway order is created out-of-band
    /// by [`Self::record_gateway_order`].
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create_local_order(
        &self,
        user_id: UserId,
        amount: Decimal,
        currency: &str,
        order_id: Option<OrderId>,
    ) -> Result<GatewayOrder, RepositoryError> {
        let order = sqlx::query_as::<_, GatewayOrder>(
            "INSERT INTO razorpay_orders (razorpay_id, amount, currency, user_id, order_id)
             VALUES ('', $1, $2, $3, $4)
             RETURNING *",
        )
        .bind(amount)
        .bind(currency)
        .bind(user_id)
        .bind(order_id)
        .fetch_one(self.pool)
        .await?;

        Ok(order)
    }

    /// Persist a mirror row for an order actually created at the gateway.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the gateway id is already
    /// recorded.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn record_gateway_order(
        &self,
        user_id: UserId,
        amount: Decimal,
        currency: &str,
        razorpay_id: &str,
        order_id: Option<OrderId>,
    ) -> Result<GatewayOrder, RepositoryError> {
        let order = sqlx::query_as::<_, GatewayOrder>(
            "INSERT INTO razorpay_orders (razorpay_id, amount, currency, user_id, order_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING *",
        )
        .bind(razorpay_id)
        .bind(amount)
        .bind(currency)
        .bind(user_id)
        .bind(order_id)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_unique_violation(e, "gateway order already recorded"))?;

        Ok(order)
    }

    /// Upsert a gateway order's status by gateway id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn upsert_order_status(
        &self,
        razorpay_id: &str,
        status: GatewayOrderStatus,
    ) -> Result<GatewayOrder, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query_as::<_, GatewayOrder>(
            "UPDATE razorpay_orders SET status = $2
             WHERE razorpay_id = $1 AND razorpay_id <> ''
             RETURNING *",
        )
        .bind(razorpay_id)
        .bind(status)
        .fetch_optional(&mut *tx)
        .await?;

        let order = match updated {
            Some(order) => order,
            None => {
                sqlx::query_as::<_, GatewayOrder>(
                    "INSERT INTO razorpay_orders (razorpay_id, amount, currency, status)
                     VALUES ($1, 0, 'INR', $2)
                     RETURNING *",
                )
                .bind(razorpay_id)
                .bind(status)
                .fetch_one(&mut *tx)
                .await?
            }
        };

        tx.commit().await?;

        Ok(order)
    }

    /// Upsert a gateway payment's status by gateway id.
    ///
    /// On conflict only the status changes; amount/currency placeholders
    /// from the original insert are kept.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn upsert_payment_status(
        &self,
        razorpay_id: &str,
        status: PaymentStatus,
        gateway_order_id: &str,
    ) -> Result<GatewayPayment, RepositoryError> {
        let payment = sqlx::query_as::<_, GatewayPayment>(
            "INSERT INTO razorpay_payments (razorpay_id, amount, currency, status, order_id)
             VALUES ($1, 0, 'INR', $2, $3)
             ON CONFLICT (razorpay_id) DO UPDATE SET status = EXCLUDED.status
             RETURNING *",
        )
        .bind(razorpay_id)
        .bind(status)
        .bind(gateway_order_id)
        .fetch_one(self.pool)
        .await?;

        Ok(payment)
    }

    /// Get a gateway order by local row id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_order(
        &self,
        id: GatewayOrderId,
    ) -> Result<Option<GatewayOrder>, RepositoryError> {
        let order = sqlx::query_as::<_, GatewayOrder>("SELECT * FROM razorpay_orders WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(order)
    }

    /// List a user's gateway orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_orders_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<GatewayOrder>, RepositoryError> {
        let orders = sqlx::query_as::<_, GatewayOrder>(
            "SELECT * FROM razorpay_orders WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(orders)
    }

    /// List the payments recorded against a gateway order id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_payments_for_order(
        &self,
        gateway_order_id: &str,
    ) -> Result<Vec<GatewayPayment>, RepositoryError> {
        let payments = sqlx::query_as::<_, GatewayPayment>(
            "SELECT * FROM razorpay_payments WHERE order_id = $1 ORDER BY created_at DESC",
        )
        .bind(gateway_order_id)
        .fetch_all(self.pool)
        .await?;

        Ok(payments)
    }
}

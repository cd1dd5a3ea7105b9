//! Saved-address repository.
//!
//! Maintains the primary-address invariant: at most one address per user
//! has `is_primary = TRUE`. Every write that touches the flag runs the
//! clear-then-set sequence inside a single transaction, and a partial
//! unique index backs the invariant at the database level.

use sqlx::PgPool;

use voltcart_core::{AddressId, UserId};

use super::RepositoryError;
use crate::models::SavedAddress;

/// Input for creating a saved address. Geocoded fields are resolved by the
/// caller before this reaches the database.
#[derive(Debug, Clone)]
pub struct NewAddress {
    pub user_id: UserId,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub receiver_name: Option<String>,
    pub address_nickname: String,
    pub receiver_phone: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub zip_code: Option<String>,
    pub is_primary: bool,
}

/// Repository for saved-address database operations.
pub struct AddressRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AddressRepository<'a> {
    /// Create a new address repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a user's saved addresses, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<SavedAddress>, RepositoryError> {
        let addresses = sqlx::query_as::<_, SavedAddress>(
            "SELECT * FROM saved_addresses WHERE user_id = $1 ORDER BY created_at ASC",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(addresses)
    }

    /// Get an address by ID, only if it belongs to the given user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_owned(
        &self,
        id: AddressId,
        user_id: UserId,
    ) -> Result<Option<SavedAddress>, RepositoryError> {
        let address = sqlx::query_as::<_, SavedAddress>(
            "SELECT * FROM saved_addresses WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(address)
    }

    /// Create a saved address.
    ///
    /// When `is_primary` is set, the user's other primary flags are cleared
    /// in the same transaction as the insert, so a crash can never leave
    /// the user with zero or two primaries.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the user already has an
    /// address with this nickname.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, new: NewAddress) -> Result<SavedAddress, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        if new.is_primary {
            sqlx::query(
                "UPDATE saved_addresses SET is_primary = FALSE
                 WHERE user_id = $1 AND is_primary",
            )
            .bind(new.user_id)
            .execute(&mut *tx)
            .await?;
        }

        let address = sqlx::query_as::<_, SavedAddress>(
            "INSERT INTO saved_addresses
                 (user_id, latitude, longitude, receiver_name, address_nickname,
                  receiver_phone, city, state, country, zip_code, is_primary)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING *",
        )
        .bind(new.user_id)
        .bind(new.latitude)
        .bind(new.longitude)
        .bind(&new.receiver_name)
        .bind(&new.address_nickname)
        .bind(&new.receiver_phone)
        .bind(&new.city)
        .bind(&new.state)
        .bind(&new.country)
        .bind(&new.zip_code)
        .bind(new.is_primary)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| RepositoryError::from_unique_violation(e, "address nickname already exists"))?;

        tx.commit().await?;

        Ok(address)
    }

    /// Make the given address the user's primary, clearing any other.
    ///
    /// Clear-then-set runs in one transaction. The address must belong to
    /// the user; a foreign or missing id fails instead of silently matching
    /// zero rows.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the address doesn't exist or
    /// belongs to another user.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn mark_primary(
        &self,
        user_id: UserId,
        address_id: AddressId,
    ) -> Result<SavedAddress, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "UPDATE saved_addresses SET is_primary = FALSE
             WHERE user_id = $1 AND is_primary",
        )
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        let address = sqlx::query_as::<_, SavedAddress>(
            "UPDATE saved_addresses SET is_primary = TRUE
             WHERE id = $1 AND user_id = $2
             RETURNING *",
        )
        .bind(address_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        tx.commit().await?;

        Ok(address)
    }

    /// Delete an address owned by the given user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the address doesn't exist or
    /// belongs to another user.
    /// Returns `RepositoryError::Conflict` if existing orders still
    /// reference the address.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: AddressId, user_id: UserId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM saved_addresses WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.is_foreign_key_violation()
                {
                    return RepositoryError::Conflict(
                        "address is referenced by existing orders".to_owned(),
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

//! Repository for the `favorites` table.
//!
//! Every query is scoped by `user_id`, so one user can never read or delete
//! another user's rows through this repository.

use figures_core::types::DbId;
use sqlx::PgPool;

use crate::models::favorite::Favorite;

const COLUMNS: &str = "id, user_id, product_id, created_at";

/// Per-user favorites ledger.
pub struct FavoriteRepo;

impl FavoriteRepo {
    /// All favorites owned by `user_id`.
    pub async fn list(pool: &PgPool, user_id: DbId) -> Result<Vec<Favorite>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM favorites WHERE user_id = $1 ORDER BY id");
        sqlx::query_as::<_, Favorite>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Record `product_id` as a favorite of `user_id`.
    ///
    /// Does not look for an existing row for the same product, so repeated
    /// calls create duplicates. An unknown product or user fails with a
    /// foreign key violation.
    pub async fn add(
        pool: &PgPool,
        user_id: DbId,
        product_id: DbId,
    ) -> Result<Favorite, sqlx::Error> {
        let query = format!(
            "INSERT INTO favorites (user_id, product_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Favorite>(&query)
            .bind(user_id)
            .bind(product_id)
            .fetch_one(pool)
            .await
    }

    /// Delete favorite `id` if it belongs to `user_id`.
    ///
    /// Returns `true` if a row was removed. A missing row is not an error.
    pub async fn remove(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM favorites WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

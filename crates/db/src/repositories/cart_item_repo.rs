//! Repository for the `cart_items` table.

use figures_core::types::DbId;
use sqlx::PgPool;

use crate::models::cart_item::{CartItem, CreateCartItem};

const COLUMNS: &str = "id, user_id, product_id, quantity, created_at";

/// Per-user cart ledger. Same contract as
/// [`FavoriteRepo`](super::FavoriteRepo) plus a quantity per line.
pub struct CartItemRepo;

impl CartItemRepo {
    pub async fn list(pool: &PgPool, user_id: DbId) -> Result<Vec<CartItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cart_items WHERE user_id = $1 ORDER BY id");
        sqlx::query_as::<_, CartItem>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Insert a new cart line. Lines for the same product are not merged.
    pub async fn add(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateCartItem,
    ) -> Result<CartItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO cart_items (user_id, product_id, quantity)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CartItem>(&query)
            .bind(user_id)
            .bind(input.product_id)
            .bind(input.quantity)
            .fetch_one(pool)
            .await
    }

    /// Delete cart line `id` if it belongs to `user_id`. Returns `true` if a
    /// row was removed.
    pub async fn remove(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cart_items WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

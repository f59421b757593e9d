//! Shopping cart line model and DTOs.

use figures_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `cart_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CartItem {
    pub id: DbId,
    pub user_id: DbId,
    pub product_id: DbId,
    pub quantity: i32,
    pub created_at: Timestamp,
}

/// DTO for adding a product to a user's cart.
#[derive(Debug, Clone)]
pub struct CreateCartItem {
    pub product_id: DbId,
    pub quantity: i32,
}

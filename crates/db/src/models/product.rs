//! Catalog product model.

use figures_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `products` table.
///
/// `price` serializes as a decimal string (e.g. `"19.99"`) so no precision is
/// lost on the way to the client.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    pub category_id: Option<DbId>,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub created_at: Timestamp,
}

/// DTO for inserting a product.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProduct {
    pub category_id: Option<DbId>,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
}

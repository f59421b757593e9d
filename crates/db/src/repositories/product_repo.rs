//! Repository for the `products` table.

use sqlx::PgPool;

use crate::models::product::{CreateProduct, Product};

const COLUMNS: &str = "id, category_id, name, description, price, created_at";

/// Read access to the catalog, plus insertion for seeding.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a product, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProduct) -> Result<Product, sqlx::Error> {
        let query = format!(
            "INSERT INTO products (category_id, name, description, price)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(input.category_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.price)
            .fetch_one(pool)
            .await
    }

    /// List the whole catalog. No pagination or filtering.
    pub async fn list(pool: &PgPool) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products ORDER BY id");
        sqlx::query_as::<_, Product>(&query).fetch_all(pool).await
    }
}

//! Handlers for the product catalog.

use axum::extract::State;
use axum::http::StatusCode;
use figures_core::types::DbId;
use figures_core::validation::validate_input;
use figures_db::models::product::{CreateProduct, Product};
use figures_db::repositories::ProductRepo;
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::error::AppResult;
use crate::extract::Json;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Largest price a `NUMERIC(10, 2)` column holds, in cents.
const MAX_PRICE_CENTS: i64 = 9_999_999_999;

/// Request body for `POST /products`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductRequest {
    pub category_id: Option<DbId>,
    #[validate(length(min = 1, max = 255, message = "must be 1 to 255 characters"))]
    pub name: String,
    pub description: Option<String>,
    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,
}

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    let invalid = |code: &'static str, message: &'static str| -> Result<(), ValidationError> {
        Err(ValidationError::new(code).with_message(message.into()))
    };

    if price.is_sign_negative() && !price.is_zero() {
        return invalid("range", "must not be negative");
    }
    if *price > Decimal::new(MAX_PRICE_CENTS, 2) {
        return invalid("range", "must be at most 99999999.99");
    }
    if price.normalize().scale() > 2 {
        return invalid("scale", "must have at most 2 decimals");
    }
    Ok(())
}

/// GET /api/products
///
/// Every product, ordered by id. No authentication required.
pub async fn list_products(State(state): State<AppState>) -> AppResult<Json<Vec<Product>>> {
    let products = ProductRepo::list(&state.pool).await?;
    Ok(Json(products))
}

/// POST /api/products
///
/// Add a product to the catalog. Any signed-in user may do this; an unknown
/// `category_id` answers 404.
pub async fn create_product(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateProductRequest>,
) -> AppResult<(StatusCode, Json<Product>)> {
    validate_input(&input)?;

    let create = CreateProduct {
        category_id: input.category_id,
        name: input.name,
        description: input.description,
        price: input.price,
    };
    let product = ProductRepo::create(&state.pool, &create).await?;

    tracing::info!(
        user_id = user.user_id,
        product_id = product.id,
        name = %product.name,
        "Product created"
    );

    Ok((StatusCode::CREATED, Json(product)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, price: &str) -> CreateProductRequest {
        CreateProductRequest {
            category_id: None,
            name: name.into(),
            description: None,
            price: price.parse().unwrap(),
        }
    }

    #[test]
    fn valid_product_passes() {
        assert!(validate_input(&request("Zoro figure", "49.90")).is_ok());
        assert!(validate_input(&request("Freebie", "0")).is_ok());
        assert!(validate_input(&request("Trailing zeros", "12.5000")).is_ok());
        assert!(validate_input(&request("Top shelf", "99999999.99")).is_ok());
    }

    #[test]
    fn empty_name_is_rejected() {
        assert!(validate_input(&request("", "1.00")).is_err());
    }

    #[test]
    fn out_of_range_prices_are_rejected() {
        for price in ["-0.01", "100000000", "1.999"] {
            assert!(
                validate_input(&request("Figure", price)).is_err(),
                "{price} must be rejected"
            );
        }
    }
}

//! Handlers for a user's cart, mounted under `/users/{user_id}/cart`.

use axum::extract::State;
use axum::http::StatusCode;
use figures_core::types::DbId;
use figures_core::validation::validate_input;
use figures_db::models::cart_item::{CartItem, CreateCartItem};
use figures_db::repositories::CartItemRepo;
use serde::Deserialize;
use validator::Validate;

use crate::error::AppResult;
use crate::extract::{Json, Path};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

fn default_quantity() -> i32 {
    1
}

/// Request body for `POST /users/{user_id}/cart`.
#[derive(Debug, Deserialize, Validate)]
pub struct AddCartItemRequest {
    pub product_id: DbId,
    /// Defaults to one unit.
    #[serde(default = "default_quantity")]
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub quantity: i32,
}

/// GET /api/users/{user_id}/cart
pub async fn list_cart(
    State(state): State<AppState>,
    user: AuthUser,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<Vec<CartItem>>> {
    user.ensure_owner(user_id)?;
    let items = CartItemRepo::list(&state.pool, user_id).await?;
    Ok(Json(items))
}

/// POST /api/users/{user_id}/cart
pub async fn add_cart_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(user_id): Path<DbId>,
    Json(input): Json<AddCartItemRequest>,
) -> AppResult<(StatusCode, Json<CartItem>)> {
    user.ensure_owner(user_id)?;
    validate_input(&input)?;

    let create = CreateCartItem {
        product_id: input.product_id,
        quantity: input.quantity,
    };
    let item = CartItemRepo::add(&state.pool, user_id, &create).await?;

    tracing::info!(
        user_id,
        cart_item_id = item.id,
        product_id = item.product_id,
        quantity = item.quantity,
        "Cart item added"
    );

    Ok((StatusCode::CREATED, Json(item)))
}

/// DELETE /api/users/{user_id}/cart/{id}
///
/// Answers 204 whether or not the row existed.
pub async fn remove_cart_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path((user_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    user.ensure_owner(user_id)?;
    let removed = CartItemRepo::remove(&state.pool, user_id, id).await?;

    tracing::info!(user_id, cart_item_id = id, removed, "Cart item removed");

    Ok(StatusCode::NO_CONTENT)
}

//! Route definitions for per-user collections.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::{cart, favorites};
use crate::state::AppState;

/// Routes mounted at `/users`. All require auth and ownership of `{user_id}`.
///
/// ```text
/// GET    /{user_id}/favorites       -> list_favorites
/// POST   /{user_id}/favorites       -> add_favorite
/// DELETE /{user_id}/favorites/{id}  -> remove_favorite
///
/// GET    /{user_id}/cart            -> list_cart
/// POST   /{user_id}/cart            -> add_cart_item
/// DELETE /{user_id}/cart/{id}       -> remove_cart_item
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{user_id}/favorites",
            get(favorites::list_favorites).post(favorites::add_favorite),
        )
        .route(
            "/{user_id}/favorites/{id}",
            delete(favorites::remove_favorite),
        )
        .route(
            "/{user_id}/cart",
            get(cart::list_cart).post(cart::add_cart_item),
        )
        .route("/{user_id}/cart/{id}", delete(cart::remove_cart_item))
}

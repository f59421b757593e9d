pub mod auth;
pub mod products;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                         register (public)
/// /auth/login                            login (public)
/// /auth/me                               current caller (requires auth)
///
/// /products                              list (public), create (requires auth)
///
/// /users/{user_id}/favorites             list, add (owner only)
/// /users/{user_id}/favorites/{id}        remove (owner only)
/// /users/{user_id}/cart                  list, add (owner only)
/// /users/{user_id}/cart/{id}             remove (owner only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/products", products::router())
        .nest("/users", users::router())
}

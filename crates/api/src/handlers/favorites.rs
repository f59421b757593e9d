//! Handlers for a user's favorites, mounted under `/users/{user_id}/favorites`.
//!
//! Every handler requires the path `user_id` to be the authenticated caller.

use axum::extract::State;
use axum::http::StatusCode;
use figures_core::types::DbId;
use figures_db::models::favorite::Favorite;
use figures_db::repositories::FavoriteRepo;
use serde::Deserialize;

use crate::error::AppResult;
use crate::extract::{Json, Path};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `POST /users/{user_id}/favorites`.
#[derive(Debug, Deserialize)]
pub struct AddFavoriteRequest {
    pub product_id: DbId,
}

/// GET /api/users/{user_id}/favorites
pub async fn list_favorites(
    State(state): State<AppState>,
    user: AuthUser,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<Vec<Favorite>>> {
    user.ensure_owner(user_id)?;
    let favorites = FavoriteRepo::list(&state.pool, user_id).await?;
    Ok(Json(favorites))
}

/// POST /api/users/{user_id}/favorites
///
/// Favoriting the same product twice creates a second row. An unknown
/// product answers 404.
pub async fn add_favorite(
    State(state): State<AppState>,
    user: AuthUser,
    Path(user_id): Path<DbId>,
    Json(input): Json<AddFavoriteRequest>,
) -> AppResult<(StatusCode, Json<Favorite>)> {
    user.ensure_owner(user_id)?;
    let favorite = FavoriteRepo::add(&state.pool, user_id, input.product_id).await?;

    tracing::info!(
        user_id,
        favorite_id = favorite.id,
        product_id = favorite.product_id,
        "Favorite added"
    );

    Ok((StatusCode::CREATED, Json(favorite)))
}

/// DELETE /api/users/{user_id}/favorites/{id}
///
/// Answers 204 whether or not the row existed.
pub async fn remove_favorite(
    State(state): State<AppState>,
    user: AuthUser,
    Path((user_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    user.ensure_owner(user_id)?;
    let removed = FavoriteRepo::remove(&state.pool, user_id, id).await?;

    tracing::info!(user_id, favorite_id = id, removed, "Favorite removed");

    Ok(StatusCode::NO_CONTENT)
}

//! Handlers for the `/auth` resource (register, login, me).

use axum::extract::State;
use figures_core::validation::validate_input;
use figures_db::models::user::{Identity, UserResponse};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppResult;
use crate::extract::Json;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 50, message = "must be 1 to 50 characters"))]
    pub username: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub password: String,
    #[validate(
        email(message = "must be a valid email address"),
        length(max = 100, message = "must be at most 100 characters")
    )]
    pub email: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/register
///
/// Create an account. A taken username or email answers 409.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<Json<UserResponse>> {
    validate_input(&input)?;

    let user = state
        .credentials()
        .register(&input.username, &input.password, &input.email)
        .await?;

    Ok(Json(UserResponse::from(user)))
}

/// POST /api/auth/login
///
/// Exchange a username and password for a bearer token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let token = state
        .credentials()
        .authenticate(&input.username, &input.password)
        .await?;

    Ok(Json(TokenResponse { token }))
}

/// GET /api/auth/me
///
/// Return the caller's id and username.
pub async fn me(user: AuthUser) -> AppResult<Json<Identity>> {
    Ok(Json(Identity {
        id: user.user_id,
        username: user.username,
    }))
}

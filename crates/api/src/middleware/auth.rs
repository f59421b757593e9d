//! Token-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use figures_core::error::CoreError;
use figures_core::types::DbId;

use crate::error::AppError;
use crate::state::AppState;

/// Authenticated caller resolved from the token in the `authorization` header.
///
/// Use this as an extractor parameter in any handler that requires authentication:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
///
/// Extraction runs before the handler body, so a request without a valid
/// token never reaches any repository call.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
    pub username: String,
}

impl AuthUser {
    /// Reject the request unless `user_id` (usually from the path) is the caller.
    pub fn ensure_owner(&self, user_id: DbId) -> Result<(), AppError> {
        if self.user_id != user_id {
            tracing::warn!(
                caller = self.user_id,
                target_user = user_id,
                "Caller tried to access another user's data"
            );
            return Err(AppError::Core(CoreError::Forbidden(
                "cannot access another user's data".into(),
            )));
        }
        Ok(())
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(token_from_header)
            .ok_or_else(|| AppError::Core(CoreError::not_authorized()))?;

        let identity = state.identity().resolve(token).await?;

        Ok(AuthUser {
            user_id: identity.id,
            username: identity.username,
        })
    }
}

/// Pull the token out of an `authorization` header value.
///
/// The storefront client sends the raw token; a `Bearer ` prefix is
/// accepted as well. Blank values yield `None`.
fn token_from_header(value: &str) -> Option<&str> {
    let value = value.trim();
    let token = match value.strip_prefix("Bearer") {
        Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => rest.trim(),
        _ => value,
    };
    (!token.is_empty()).then_some(token)
}

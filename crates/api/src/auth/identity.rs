//! Bearer token to caller identity.

use figures_core::error::CoreError;
use figures_db::models::user::Identity;
use figures_db::repositories::UserRepo;
use figures_db::DbPool;

use crate::auth::jwt::{verify_token, JwtConfig};
use crate::error::AppResult;

/// Gate in front of protected operations.
pub struct IdentityResolver<'a> {
    pool: &'a DbPool,
    jwt: &'a JwtConfig,
}

impl<'a> IdentityResolver<'a> {
    pub fn new(pool: &'a DbPool, jwt: &'a JwtConfig) -> Self {
        Self { pool, jwt }
    }

    /// Verify `token` and load the user it names.
    ///
    /// A malformed or wrongly signed token, and a token for a user that no
    /// longer exists, all fail with [`CoreError::Unauthorized`]. Only the id
    /// and username are returned, never the password hash.
    pub async fn resolve(&self, token: &str) -> AppResult<Identity> {
        let claims = verify_token(token, self.jwt).map_err(|e| {
            tracing::debug!(error = %e, "Token rejected");
            CoreError::not_authorized()
        })?;

        UserRepo::find_identity(self.pool, claims.user_id)
            .await?
            .ok_or_else(|| {
                tracing::warn!(
                    user_id = claims.user_id,
                    "Token names a user that no longer exists"
                );
                CoreError::not_authorized().into()
            })
    }
}

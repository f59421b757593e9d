//! Registration and login against the `users` table.

use figures_core::error::CoreError;
use figures_db::models::user::{CreateUser, User};
use figures_db::repositories::UserRepo;
use figures_db::DbPool;

use crate::auth::jwt::{mint_token, JwtConfig};
use crate::auth::password::{hash_password, verify_password, PasswordConfig};
use crate::error::{AppError, AppResult};

/// Owns username/password-hash persistence and token issuance.
///
/// Borrowed from [`AppState`](crate::state::AppState) per request; holds no
/// state of its own.
pub struct CredentialStore<'a> {
    pool: &'a DbPool,
    jwt: &'a JwtConfig,
    password: &'a PasswordConfig,
}

impl<'a> CredentialStore<'a> {
    pub fn new(pool: &'a DbPool, jwt: &'a JwtConfig, password: &'a PasswordConfig) -> Self {
        Self {
            pool,
            jwt,
            password,
        }
    }

    /// Create a user with a freshly hashed password.
    ///
    /// A taken username or email fails with [`CoreError::Conflict`] and leaves
    /// the existing account untouched.
    pub async fn register(&self, username: &str, password: &str, email: &str) -> AppResult<User> {
        let password_hash = hash_password(password, self.password)
            .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

        let input = CreateUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash,
        };

        let user = UserRepo::create(self.pool, &input)
            .await
            .map_err(|err| match figures_db::unique_violation(&err) {
                Some(constraint) => {
                    tracing::info!(username, constraint, "Registration rejected, duplicate value");
                    AppError::Core(CoreError::Conflict(conflict_message(constraint).into()))
                }
                None => AppError::Database(err),
            })?;

        tracing::info!(user_id = user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Check a username/password pair and mint a token on success.
    ///
    /// An unknown username and a wrong password produce the same
    /// [`CoreError::Unauthorized`].
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<String> {
        let Some(user) = UserRepo::find_by_username(self.pool, username).await? else {
            tracing::warn!(username, "Login failed, unknown username");
            return Err(CoreError::not_authorized().into());
        };

        let password_valid = verify_password(password, &user.password_hash)
            .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

        if !password_valid {
            tracing::warn!(username, "Login failed, wrong password");
            return Err(CoreError::not_authorized().into());
        }

        let token = mint_token(user.id, self.jwt)
            .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

        tracing::info!(user_id = user.id, "User logged in");
        Ok(token)
    }
}

fn conflict_message(constraint: &str) -> &'static str {
    match constraint {
        "uq_users_username" => "username already exists",
        "uq_users_email" => "email already exists",
        _ => "user already exists",
    }
}

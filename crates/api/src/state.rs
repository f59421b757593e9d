use std::sync::Arc;

use crate::auth::credentials::CredentialStore;
use crate::auth::identity::IdentityResolver;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the pool is reference-counted internally and the
/// configuration sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: figures_db::DbPool,
    /// Server configuration (token secret, hashing cost, CORS, timeouts).
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(pool: figures_db::DbPool, config: ServerConfig) -> Self {
        Self {
            pool,
            config: Arc::new(config),
        }
    }

    pub fn credentials(&self) -> CredentialStore<'_> {
        CredentialStore::new(&self.pool, &self.config.jwt, &self.config.password)
    }

    pub fn identity(&self) -> IdentityResolver<'_> {
        IdentityResolver::new(&self.pool, &self.config.jwt)
    }
}

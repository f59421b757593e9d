//! Request extractors for protected routes.
//!
//! - [`auth::AuthUser`] -- Resolves the caller from the `authorization` header.

pub mod auth;

//! Authentication primitives and the components built on them.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- signed bearer token minting and verification.
//! - [`credentials`] -- registration and login against the `users` table.
//! - [`identity`] -- bearer token to caller identity.

pub mod credentials;
pub mod identity;
pub mod jwt;
pub mod password;

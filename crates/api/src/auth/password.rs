//! Argon2id password hashing and verification.
//!
//! All password hashes use the Argon2id variant with a cryptographically random
//! salt generated via [`OsRng`]. The PHC string format is used for storage so
//! that algorithm parameters and salt are embedded in the hash itself; changing
//! the configured cost therefore never invalidates existing hashes.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::config::{parse_or, ConfigError};

/// Tunable Argon2id cost used when hashing new passwords.
#[derive(Debug, Clone, Default)]
pub struct PasswordConfig {
    params: Params,
}

impl PasswordConfig {
    /// Build a config from explicit cost parameters.
    ///
    /// `memory_kib` must be at least `8 * parallelism` and `iterations` at
    /// least 1.
    pub fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> Result<Self, argon2::Error> {
        let params = Params::new(memory_kib, iterations, parallelism, None)?;
        Ok(Self { params })
    }

    /// Load hashing cost from environment-style lookups.
    ///
    /// | Env Var                     | Default (argon2 crate) |
    /// |-----------------------------|------------------------|
    /// | `PASSWORD_HASH_MEMORY_KIB`  | `19456`                |
    /// | `PASSWORD_HASH_ITERATIONS`  | `2`                    |
    /// | `PASSWORD_HASH_PARALLELISM` | `1`                    |
    pub fn from_source(get: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let memory_kib = parse_or(get, "PASSWORD_HASH_MEMORY_KIB", Params::DEFAULT_M_COST)?;
        let iterations = parse_or(get, "PASSWORD_HASH_ITERATIONS", Params::DEFAULT_T_COST)?;
        let parallelism = parse_or(get, "PASSWORD_HASH_PARALLELISM", Params::DEFAULT_P_COST)?;

        Self::new(memory_kib, iterations, parallelism).map_err(|e| ConfigError::Invalid {
            key: "PASSWORD_HASH_*",
            value: format!("m={memory_kib},t={iterations},p={parallelism}"),
            reason: e.to_string(),
        })
    }

    fn hasher(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

/// Hash a plaintext password using Argon2id with a random salt.
///
/// Returns the PHC-formatted hash string (includes algorithm, params, salt, and hash).
pub fn hash_password(
    password: &str,
    config: &PasswordConfig,
) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = config.hasher().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC-formatted Argon2id hash.
///
/// Cost parameters are read back from the hash, and the comparison is the
/// library's own. Returns `Ok(true)` if the password matches, `Ok(false)` if
/// it does not.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

//! Signed bearer tokens.
//!
//! Tokens are HS256-signed JWTs carrying a [`Claims`] payload. They are not
//! persisted and there is no revocation list: a token stays valid for as long
//! as the signing secret does. By default no `exp` claim is issued; setting
//! `JWT_EXPIRY_MINS` adds one and makes it mandatory on verification.

use figures_core::types::DbId;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::{parse_opt, required, ConfigError};

/// JWT claims embedded in every token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// The user's internal database id.
    pub user_id: DbId,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Expiration time (UTC Unix timestamp), only when expiry is enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

/// Longest accepted token lifetime: ten years.
pub const MAX_EXPIRY_MINS: i64 = 10 * 365 * 24 * 60;

/// Configuration for token minting and verification.
#[derive(Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Token lifetime in minutes. `None` issues tokens without an `exp` claim.
    pub expiry_mins: Option<i64>,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expiry_mins", &self.expiry_mins)
            .finish()
    }
}

impl JwtConfig {
    /// Load token configuration from environment-style lookups.
    ///
    /// | Env Var           | Required | Default      |
    /// |-------------------|----------|--------------|
    /// | `JWT_SECRET`      | **yes**  | --           |
    /// | `JWT_EXPIRY_MINS` | no       | no expiry    |
    ///
    /// `JWT_EXPIRY_MINS` must lie in `1..=MAX_EXPIRY_MINS`.
    pub fn from_source(get: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let secret = required(get, "JWT_SECRET")?;
        let expiry_mins: Option<i64> = parse_opt(get, "JWT_EXPIRY_MINS")?;

        if let Some(mins) = expiry_mins {
            if !(1..=MAX_EXPIRY_MINS).contains(&mins) {
                return Err(ConfigError::Invalid {
                    key: "JWT_EXPIRY_MINS",
                    value: mins.to_string(),
                    reason: format!("must be between 1 and {MAX_EXPIRY_MINS}"),
                });
            }
        }

        Ok(Self {
            secret,
            expiry_mins,
        })
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::default(); // HS256
        validation.required_spec_claims.clear();
        if self.expiry_mins.is_some() {
            validation.set_required_spec_claims(&["exp"]);
            validation.validate_exp = true;
        } else {
            validation.validate_exp = false;
        }
        validation
    }
}

/// Mint an HS256 token identifying `user_id`.
pub fn mint_token(
    user_id: DbId,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();

    let claims = Claims {
        user_id,
        iat: now,
        exp: config
            .expiry_mins
            .map(|mins| now.saturating_add(mins.saturating_mul(60))),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify a token's signature and decode its [`Claims`].
///
/// Expiry is checked only when the config enables it.
pub fn verify_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &config.validation(),
    )?;
    Ok(token_data.claims)
}

use std::fmt::Display;
use std::str::FromStr;

use axum::http::HeaderValue;

use crate::auth::jwt::JwtConfig;
use crate::auth::password::PasswordConfig;

/// Default cap on pooled database connections.
const DEFAULT_MAX_CONNECTIONS: u32 = figures_db::DEFAULT_MAX_CONNECTIONS;

/// A configuration value that is missing or cannot be parsed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set and non-empty")]
    Missing(&'static str),

    #[error("{key} has invalid value '{value}': {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Log output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines (development).
    Pretty,
    /// One JSON object per event (log aggregation).
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("expected 'pretty' or 'json', got '{other}'")),
        }
    }
}

/// Database connection settings.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection string (`DATABASE_URL`).
    pub url: String,
    /// Pool size (`DATABASE_MAX_CONNECTIONS`, default `20`).
    pub max_connections: u32,
}

/// Server configuration loaded from environment variables.
///
/// Everything except `DATABASE_URL` and `JWT_SECRET` has a default suitable
/// for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    /// Each entry is checked to be a valid header value at load time.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub log_format: LogFormat,
    pub database: DatabaseConfig,
    /// Token signing configuration.
    pub jwt: JwtConfig,
    /// Password hashing cost.
    pub password: PasswordConfig,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                    | Default                    |
    /// |----------------------------|----------------------------|
    /// | `HOST`                     | `0.0.0.0`                  |
    /// | `PORT`                     | `3000`                     |
    /// | `CORS_ORIGINS`             | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                       |
    /// | `LOG_FORMAT`               | `pretty`                   |
    /// | `DATABASE_URL`             | required                   |
    /// | `DATABASE_MAX_CONNECTIONS` | `20`                       |
    ///
    /// See [`JwtConfig`] and [`PasswordConfig`] for the auth settings.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key/value lookup.
    pub fn from_source(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup(&get, "HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or(&get, "PORT", 3000u16)?;

        let cors_origins: Vec<String> = lookup(&get, "CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        for origin in &cors_origins {
            if let Err(e) = origin.parse::<HeaderValue>() {
                return Err(ConfigError::Invalid {
                    key: "CORS_ORIGINS",
                    value: origin.clone(),
                    reason: e.to_string(),
                });
            }
        }

        let request_timeout_secs = parse_or(&get, "REQUEST_TIMEOUT_SECS", 30u64)?;
        let log_format = parse_or(&get, "LOG_FORMAT", LogFormat::Pretty)?;

        let database = DatabaseConfig {
            url: required(&get, "DATABASE_URL")?,
            max_connections: parse_or(
                &get,
                "DATABASE_MAX_CONNECTIONS",
                DEFAULT_MAX_CONNECTIONS,
            )?,
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            log_format,
            database,
            jwt: JwtConfig::from_source(&get)?,
            password: PasswordConfig::from_source(&get)?,
        })
    }
}

/// Read a key, treating blank values as unset.
pub(crate) fn lookup(get: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    get(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read a key that has no default.
pub(crate) fn required(
    get: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<String, ConfigError> {
    lookup(get, key).ok_or(ConfigError::Missing(key))
}

/// Parse an optional key, returning `None` when it is unset.
pub(crate) fn parse_opt<T>(
    get: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    lookup(get, key)
        .map(|value| {
            value.parse::<T>().map_err(|e| ConfigError::Invalid {
                key,
                reason: e.to_string(),
                value,
            })
        })
        .transpose()
}

/// Parse a key, falling back to `default` when it is unset.
pub(crate) fn parse_or<T>(
    get: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    Ok(parse_opt(get, key)?.unwrap_or(default))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn source(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const MINIMAL: &[(&str, &str)] = &[
        ("DATABASE_URL", "postgres://localhost/figures"),
        ("JWT_SECRET", "figures"),
    ];

    #[test]
    fn defaults_apply_when_unset() {
        let config = ServerConfig::from_source(source(MINIMAL)).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.cors_origins, vec!["http://localhost:5173"]);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.database.max_connections, 20);
        assert_eq!(config.jwt.expiry_mins, None);
    }

    #[test]
    fn overrides_are_parsed() {
        let mut pairs = MINIMAL.to_vec();
        pairs.extend_from_slice(&[
            ("PORT", "8080"),
            ("CORS_ORIGINS", "http://a.test, http://b.test,"),
            ("LOG_FORMAT", "JSON"),
            ("JWT_EXPIRY_MINS", "60"),
        ]);
        let config = ServerConfig::from_source(source(&pairs)).unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.jwt.expiry_mins, Some(60));
    }

    #[test]
    fn missing_database_url_is_reported() {
        let err = ServerConfig::from_source(source(&[("JWT_SECRET", "s")])).unwrap_err();
        assert_matches!(err, ConfigError::Missing("DATABASE_URL"));
    }

    #[test]
    fn blank_jwt_secret_is_missing() {
        let err = ServerConfig::from_source(source(&[
            ("DATABASE_URL", "postgres://localhost/figures"),
            ("JWT_SECRET", "   "),
        ]))
        .unwrap_err();
        assert_matches!(err, ConfigError::Missing("JWT_SECRET"));
    }

    #[test]
    fn invalid_cors_origin_is_reported() {
        let mut pairs = MINIMAL.to_vec();
        pairs.push(("CORS_ORIGINS", "http://ok.test,bad\norigin"));
        let err = ServerConfig::from_source(source(&pairs)).unwrap_err();
        assert_matches!(err, ConfigError::Invalid { key: "CORS_ORIGINS", .. });
    }

    #[test]
    fn invalid_port_is_reported() {
        let mut pairs = MINIMAL.to_vec();
        pairs.push(("PORT", "not-a-port"));
        let err = ServerConfig::from_source(source(&pairs)).unwrap_err();
        assert_matches!(err, ConfigError::Invalid { key: "PORT", .. });
    }
}

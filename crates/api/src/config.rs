use std::fmt::Display;
use std::str::FromStr;

use axum::http::HeaderValue;

use crate::auth::jwt::JwtConfig;

/// A missing or malformed configuration value. The server refuses to start.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port. Required.
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// When set, requests without a token see every item instead of being
    /// rejected (default: `false`).
    pub anonymous_mode: bool,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | -- (required)              |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `ANONYMOUS_MODE`       | `false`                    |
    pub fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());

        let port: u16 = parse_required(lookup, "PORT")?;

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        for origin in &cors_origins {
            HeaderValue::from_str(origin).map_err(|e| ConfigError::Invalid {
                name: "CORS_ORIGINS",
                reason: format!("'{origin}': {e}"),
            })?;
        }

        let request_timeout_secs: u64 = parse_or(lookup, "REQUEST_TIMEOUT_SECS", 30)?;
        let anonymous_mode: bool = parse_or(lookup, "ANONYMOUS_MODE", false)?;

        let jwt = JwtConfig::from_lookup(lookup)?;

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            anonymous_mode,
            jwt,
        })
    }
}

/// Parse `name` if set, otherwise fall back to `default`.
pub(crate) fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(name) {
        Some(raw) => parse_value(name, &raw),
        None => Ok(default),
    }
}

fn parse_required<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    let raw = lookup(name).ok_or(ConfigError::Missing(name))?;
    parse_value(name, &raw)
}

fn parse_value<T>(name: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        name,
        reason: format!("'{raw}': {e}"),
    })
}

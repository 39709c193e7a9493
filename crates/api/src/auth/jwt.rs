//! JWT access-token generation and validation.
//!
//! Access tokens are HS256-signed JWTs carrying a [`Claims`] payload whose
//! subject is the account id. Resolving a token to an account is the only
//! session handling the server does.

use habitcat_core::types::DbId;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{parse_or, ConfigError};

/// JWT claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the account's internal database id.
    pub sub: DbId,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4).
    pub jti: String,
}

/// Configuration for JWT token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Access token lifetime in minutes (default: 1440).
    pub access_token_expiry_mins: i64,
}

/// Default access token expiry in minutes (one day).
const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 24 * 60;

impl JwtConfig {
    /// Load JWT configuration through `lookup`.
    ///
    /// | Env Var                  | Required | Default |
    /// |--------------------------|----------|---------|
    /// | `JWT_SECRET`             | **yes**  | --      |
    /// | `JWT_ACCESS_EXPIRY_MINS` | no       | `1440`  |
    pub fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let secret = lookup("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let access_token_expiry_mins: i64 =
            parse_or(lookup, "JWT_ACCESS_EXPIRY_MINS", DEFAULT_ACCESS_EXPIRY_MINS)?;
        if access_token_expiry_mins <= 0 {
            return Err(ConfigError::Invalid {
                name: "JWT_ACCESS_EXPIRY_MINS",
                reason: "must be positive".into(),
            });
        }

        Ok(Self {
            secret,
            access_token_expiry_mins,
        })
    }
}

/// Generate an HS256 access token for the given account.
pub fn generate_access_token(
    account_id: DbId,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: account_id,
        exp: now + config.access_token_expiry_mins * 60,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode an access token, returning the embedded [`Claims`].
///
/// Validates the signature and expiration.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn test_config(secret: &str) -> JwtConfig {
        JwtConfig {
            secret: secret.to_string(),
            access_token_expiry_mins: 15,
        }
    }

    #[test]
    fn test_generate_and_validate_access_token() {
        let config = test_config("test-secret-that-is-long-enough-for-hmac");
        let token = generate_access_token(42, &config).expect("token generation should succeed");

        let claims = validate_token(&token, &config).expect("token validation should succeed");
        assert_eq!(claims.sub, 42);
        assert!(claims.exp > claims.iat);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn test_expired_token_fails() {
        let config = test_config("test-secret-that-is-long-enough-for-hmac");

        // Well beyond the default 60-second leeway.
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: 1,
            exp: now - 300,
            iat: now - 600,
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .expect("encoding should succeed");

        assert!(validate_token(&token, &config).is_err());
    }

    #[test]
    fn test_different_secrets_fail() {
        let token = generate_access_token(1, &test_config("secret-alpha")).unwrap();
        assert!(validate_token(&token, &test_config("secret-bravo")).is_err());
    }

    #[test]
    fn test_config_requires_secret() {
        let vars: HashMap<&str, &str> = HashMap::from([("JWT_SECRET", "")]);
        let lookup = |key: &str| vars.get(key).map(|v| v.to_string());
        assert_matches!(
            JwtConfig::from_lookup(&lookup),
            Err(ConfigError::Missing("JWT_SECRET"))
        );
    }

    #[test]
    fn test_config_defaults_expiry() {
        let vars: HashMap<&str, &str> = HashMap::from([("JWT_SECRET", "s3cret")]);
        let lookup = |key: &str| vars.get(key).map(|v| v.to_string());
        let config = JwtConfig::from_lookup(&lookup).unwrap();
        assert_eq!(config.access_token_expiry_mins, DEFAULT_ACCESS_EXPIRY_MINS);
    }
}

//! JWT-based identity extractors for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use habitcat_core::error::CoreError;
use habitcat_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated account extracted from a JWT Bearer token in the
/// `Authorization` header. Rejects the request when the token is absent.
#[derive(Debug, Clone)]
pub struct AuthAccount {
    /// The account's internal database id (from `claims.sub`).
    pub account_id: DbId,
}

/// The scope every progress engine call runs under.
///
/// `Some(id)` when the request carries a valid token. `None` (global
/// visibility) only when there is no token and the server runs in anonymous
/// mode; otherwise a missing token is rejected. An invalid token is always
/// rejected.
#[derive(Debug, Clone, Copy)]
pub struct AccountScope(pub Option<DbId>);

impl FromRequestParts<AppState> for AuthAccount {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let account_id = bearer_account(parts, state)?.ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Missing Authorization header".into(),
            ))
        })?;
        Ok(AuthAccount { account_id })
    }
}

impl FromRequestParts<AppState> for AccountScope {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match bearer_account(parts, state)? {
            Some(account_id) => Ok(AccountScope(Some(account_id))),
            None if state.config.anonymous_mode => Ok(AccountScope(None)),
            None => Err(AppError::Core(CoreError::Unauthorized(
                "Missing Authorization header".into(),
            ))),
        }
    }
}

/// Resolve the bearer token, if any, to an account id.
fn bearer_account(parts: &Parts, state: &AppState) -> Result<Option<DbId>, AppError> {
    let Some(auth_header) = parts.headers.get("authorization") else {
        return Ok(None);
    };

    let token = auth_header
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

    let claims = validate_token(token, &state.config.jwt).map_err(|_| {
        AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
    })?;

    Ok(Some(claims.sub))
}

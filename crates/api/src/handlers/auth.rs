//! Handlers for the `/auth` resource (signup, login, current account).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use habitcat_core::error::CoreError;
use habitcat_core::types::DbId;
use habitcat_db::models::account::{AccountResponse, CreateAccount};
use habitcat_db::repositories::AccountRepo;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, validate_signup, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthAccount;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/signup` and `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

/// Successful authentication response returned by signup and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub account: AccountResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/signup
///
/// Create an account and sign it in. Returns 409 if the email is taken.
pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<CredentialsRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    validate_signup(&input.email, &input.password)?;

    if AccountRepo::find_by_email(&state.pool, &input.email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "An account with email '{}' already exists",
            input.email
        ))));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    // A concurrent signup for the same email still loses on `uq_accounts_email`.
    let account = AccountRepo::create(
        &state.pool,
        &CreateAccount {
            email: input.email,
            password_hash,
        },
    )
    .await?;
    tracing::info!(account_id = account.id, "Account created");

    let response = auth_response(&state, account.id, AccountResponse::from(&account))?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. Unknown emails and wrong passwords
/// get the same 401.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<CredentialsRequest>,
) -> AppResult<Json<AuthResponse>> {
    let account = AccountRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(invalid_credentials)?;

    let password_valid = verify_password(&input.password, &account.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::debug!(account_id = account.id, "Rejected login");
        return Err(invalid_credentials());
    }

    let response = auth_response(&state, account.id, AccountResponse::from(&account))?;
    Ok(Json(response))
}

/// GET /api/v1/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthAccount,
) -> AppResult<Json<AccountResponse>> {
    let account = AccountRepo::find_by_id(&state.pool, auth.account_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Account no longer exists".into()))
        })?;
    Ok(Json(AccountResponse::from(&account)))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Invalid email or password".into(),
    ))
}

fn auth_response(
    state: &AppState,
    account_id: DbId,
    account: AccountResponse,
) -> AppResult<AuthResponse> {
    let access_token = generate_access_token(account_id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    Ok(AuthResponse {
        access_token,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        account,
    })
}

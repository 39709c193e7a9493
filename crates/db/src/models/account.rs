//! Account entity model and DTOs.

use habitcat_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full account row from the `accounts` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`AccountResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct Account {
    pub id: DbId,
    pub email: String,
    pub password_hash: String,
    pub created_at: Timestamp,
}

/// Safe account representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct AccountResponse {
    pub id: DbId,
    pub email: String,
    pub created_at: Timestamp,
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            email: account.email.clone(),
            created_at: account.created_at,
        }
    }
}

/// DTO for creating a new account. The hash is produced by the caller.
#[derive(Debug, Deserialize)]
pub struct CreateAccount {
    pub email: String,
    pub password_hash: String,
}

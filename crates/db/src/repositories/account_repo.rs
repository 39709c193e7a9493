//! Repository for the `accounts` table.

use habitcat_core::types::DbId;
use sqlx::PgPool;

use crate::models::account::{Account, CreateAccount};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, password_hash, created_at";

/// Provides create and lookup operations for accounts.
pub struct AccountRepo;

impl AccountRepo {
    /// Insert a new account, returning the created row.
    ///
    /// A duplicate email violates `uq_accounts_email`.
    pub async fn create(pool: &PgPool, input: &CreateAccount) -> Result<Account, sqlx::Error> {
        let query = format!(
            "INSERT INTO accounts (email, password_hash)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Account>(&query)
            .bind(&input.email)
            .bind(&input.password_hash)
            .fetch_one(pool)
            .await
    }

    /// Find an account by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Account>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM accounts WHERE id = $1");
        sqlx::query_as::<_, Account>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an account by email (case-sensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Account>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM accounts WHERE email = $1");
        sqlx::query_as::<_, Account>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }
}

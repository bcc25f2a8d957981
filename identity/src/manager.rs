//! Identity management handle.
//!
//! [`AccountManager`] abstracts the two operations the bootstrap layer
//! consumes: counting existing accounts and creating an account with a
//! password under policy enforcement. [`PostgresAccountManager`] is the
//! production implementation over the identity store's `PgPool`.

use crate::account::{Account, AccountId, NewAccount};
use crate::error::{IdentityError, Result};
use crate::password::{hash_password, validate_password};
use chrono::{DateTime, Utc};
use sqlx::PgPool;

/// Identity management handle.
pub trait AccountManager: Send + Sync {
    /// Count accounts currently in the identity store.
    ///
    /// # Errors
    ///
    /// Returns error if the store cannot be queried.
    async fn count_accounts(&self) -> Result<u64>;

    /// Create an account with a password, enforcing the password policy.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The password violates the policy → [`IdentityError::PolicyViolation`]
    /// - Username or email already exists → [`IdentityError::DuplicateAccount`]
    /// - The store rejects the write
    async fn create_account(&self, account: &NewAccount, password: &str) -> Result<Account>;
}

/// PostgreSQL account manager.
#[derive(Clone)]
pub struct PostgresAccountManager {
    /// Connection pool, one per process.
    pool: PgPool,
}

impl PostgresAccountManager {
    /// Create a new account manager over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply all pending identity schema migrations.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Migration`] if a migration cannot be applied.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| IdentityError::Migration(e.to_string()))?;
        Ok(())
    }
}

impl AccountManager for PostgresAccountManager {
    async fn count_accounts(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM accounts")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| IdentityError::Database(format!("Failed to count accounts: {e}")))?;
        Ok(count.unsigned_abs())
    }

    async fn create_account(&self, account: &NewAccount, password: &str) -> Result<Account> {
        validate_new_account(account)?;
        validate_password(password)?;

        let id = AccountId::new();
        let password_hash = hash_password(password);

        let created_at: DateTime<Utc> = sqlx::query_scalar(
            "INSERT INTO accounts \
                 (id, username, email, display_name, phone_number, password_hash) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING created_at",
        )
        .bind(id.0)
        .bind(&account.username)
        .bind(&account.email)
        .bind(&account.display_name)
        .bind(&account.phone_number)
        .bind(&password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return IdentityError::DuplicateAccount;
                }
            }
            IdentityError::Database(format!("Failed to create account: {e}"))
        })?;

        Ok(Account {
            id,
            username: account.username.clone(),
            email: account.email.clone(),
            display_name: account.display_name.clone(),
            phone_number: account.phone_number.clone(),
            created_at,
        })
    }
}

/// Reject obviously unusable account field values before touching the store.
pub(crate) fn validate_new_account(account: &NewAccount) -> Result<()> {
    if account.username.trim().is_empty() {
        return Err(IdentityError::InvalidAccount(
            "username must not be empty".to_string(),
        ));
    }
    let email = account.email.trim();
    if email.is_empty() || !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
        return Err(IdentityError::InvalidAccount(format!(
            "email {email:?} is not a valid address"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn account(username: &str, email: &str) -> NewAccount {
        NewAccount {
            username: username.to_string(),
            email: email.to_string(),
            display_name: "Test".to_string(),
            phone_number: String::new(),
        }
    }

    #[test]
    fn rejects_empty_username() {
        let err = validate_new_account(&account("  ", "a@b.test")).unwrap_err();
        assert!(matches!(err, IdentityError::InvalidAccount(_)));
    }

    #[test]
    fn rejects_invalid_email() {
        for email in ["", "no-at-sign", "@leading", "trailing@"] {
            assert!(
                validate_new_account(&account("user", email)).is_err(),
                "email {email:?} should be rejected"
            );
        }
    }

    #[test]
    fn accepts_valid_account() {
        assert!(validate_new_account(&account("user", "user@example.test")).is_ok());
    }
}

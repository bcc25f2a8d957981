//! Mock account manager for testing.

use crate::account::{Account, AccountId, NewAccount};
use crate::error::{IdentityError, Result};
use crate::manager::AccountManager;
use crate::password::validate_password;
use chrono::Utc;
use std::sync::{Arc, Mutex};

/// Mock account manager backed by in-memory storage.
///
/// Enforces the same password policy and uniqueness rules as the Postgres
/// implementation so seeding behavior can be exercised without a database.
#[derive(Debug, Clone, Default)]
pub struct MockAccountManager {
    accounts: Arc<Mutex<Vec<Account>>>,
    create_calls: Arc<Mutex<usize>>,
    forced_create_error: Arc<Mutex<Option<IdentityError>>>,
}

impl MockAccountManager {
    /// Create an empty mock store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock store preloaded with `count` unrelated accounts.
    #[must_use]
    pub fn with_unrelated_accounts(count: usize) -> Self {
        let accounts = (0..count)
            .map(|i| Account {
                id: AccountId::new(),
                username: format!("resident{i}"),
                email: format!("resident{i}@example.test"),
                display_name: format!("Resident {i}"),
                phone_number: String::new(),
                created_at: Utc::now(),
            })
            .collect();
        Self {
            accounts: Arc::new(Mutex::new(accounts)),
            ..Self::default()
        }
    }

    /// Force every `create_account` call to fail with `error`.
    #[must_use]
    pub fn failing_create(self, error: IdentityError) -> Self {
        if let Ok(mut forced) = self.forced_create_error.lock() {
            *forced = Some(error);
        }
        self
    }

    /// Number of `create_account` calls observed.
    #[must_use]
    pub fn create_calls(&self) -> usize {
        self.create_calls.lock().map_or(0, |calls| *calls)
    }

    /// Snapshot of the stored accounts.
    #[must_use]
    pub fn accounts(&self) -> Vec<Account> {
        self.accounts.lock().map_or_else(|_| Vec::new(), |a| a.clone())
    }
}

impl AccountManager for MockAccountManager {
    async fn count_accounts(&self) -> Result<u64> {
        let accounts = self
            .accounts
            .lock()
            .map_err(|_| IdentityError::Database("mock lock poisoned".to_string()))?;
        Ok(accounts.len() as u64)
    }

    async fn create_account(&self, account: &NewAccount, password: &str) -> Result<Account> {
        {
            let mut calls = self
                .create_calls
                .lock()
                .map_err(|_| IdentityError::Database("mock lock poisoned".to_string()))?;
            *calls += 1;
        }

        if let Ok(forced) = self.forced_create_error.lock() {
            if let Some(error) = forced.clone() {
                return Err(error);
            }
        }

        validate_password(password)?;

        let mut accounts = self
            .accounts
            .lock()
            .map_err(|_| IdentityError::Database("mock lock poisoned".to_string()))?;
        if accounts
            .iter()
            .any(|a| a.username == account.username || a.email == account.email)
        {
            return Err(IdentityError::DuplicateAccount);
        }

        let created = Account {
            id: AccountId::new(),
            username: account.username.clone(),
            email: account.email.clone(),
            display_name: account.display_name.clone(),
            phone_number: account.phone_number.clone(),
            created_at: Utc::now(),
        };
        accounts.push(created.clone());
        Ok(created)
    }
}

//! Baseline account seeding.
//!
//! Guarantees the identity store has at least one usable account after first
//! deployment. Seeding is triggered by "the account collection is empty", not
//! by "this exact account is missing": a store that already holds any account
//! — related or not — is left untouched, which is what makes repeated
//! invocations converge on the state reached by the first successful one.

use crate::account::NewAccount;
use crate::error::{IdentityError, Result};
use crate::manager::AccountManager;
use tracing::{debug, info};

/// Baseline account display name.
pub const BASELINE_DISPLAY_NAME: &str = "Tmp";
/// Baseline account email.
pub const BASELINE_EMAIL: &str = "tmp@gmail.com";
/// Baseline account username.
pub const BASELINE_USERNAME: &str = "tmp.example";
/// Baseline account phone number.
pub const BASELINE_PHONE: &str = "+20900045";
/// Initial password for the baseline account.
pub const BASELINE_PASSWORD: &str = "Pa$$w0rd";

/// Field values of the baseline account.
#[must_use]
pub fn baseline_account() -> NewAccount {
    NewAccount {
        username: BASELINE_USERNAME.to_string(),
        email: BASELINE_EMAIL.to_string(),
        display_name: BASELINE_DISPLAY_NAME.to_string(),
        phone_number: BASELINE_PHONE.to_string(),
    }
}

/// Seed the baseline account if and only if the account collection is empty.
///
/// 1. Query the total account count.
/// 2. If zero, create the baseline account through the identity management
///    handle, which enforces the password policy.
/// 3. Otherwise do nothing.
///
/// A unique-constraint conflict on creation means another process start won
/// the race between our emptiness check and our insert; the uniqueness
/// guarantee lives in the store's constraints, so that outcome is reported as
/// already-seeded rather than a failure.
///
/// # Errors
///
/// Any other creation failure (policy rejection, store error) is surfaced to
/// the caller as a failed seeding attempt; there is no internal retry.
pub async fn seed_baseline_account<M: AccountManager>(manager: &M) -> Result<()> {
    let count = manager.count_accounts().await?;
    if count > 0 {
        debug!(count, "identity store already has accounts, skipping seed");
        return Ok(());
    }

    match manager.create_account(&baseline_account(), BASELINE_PASSWORD).await {
        Ok(account) => {
            info!(username = %account.username, "baseline account created");
            Ok(())
        }
        Err(IdentityError::DuplicateAccount) => {
            info!("baseline account already present after concurrent start, treating as seeded");
            Ok(())
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::mocks::MockAccountManager;

    #[tokio::test]
    async fn empty_store_triggers_seed() {
        let manager = MockAccountManager::new();

        seed_baseline_account(&manager).await.unwrap();

        assert_eq!(manager.count_accounts().await.unwrap(), 1);
        let accounts = manager.accounts();
        assert_eq!(accounts[0].username, "tmp.example");
        assert_eq!(accounts[0].email, "tmp@gmail.com");
        assert_eq!(accounts[0].display_name, "Tmp");
        assert_eq!(accounts[0].phone_number, "+20900045");
    }

    #[tokio::test]
    async fn repeated_invocations_are_idempotent() {
        let manager = MockAccountManager::new();

        for _ in 0..3 {
            seed_baseline_account(&manager).await.unwrap();
        }

        assert_eq!(manager.count_accounts().await.unwrap(), 1);
        assert_eq!(manager.create_calls(), 1);
    }

    #[tokio::test]
    async fn populated_store_skips_seed() {
        let manager = MockAccountManager::with_unrelated_accounts(5);

        seed_baseline_account(&manager).await.unwrap();

        assert_eq!(manager.count_accounts().await.unwrap(), 5);
        assert_eq!(manager.create_calls(), 0);
    }

    #[tokio::test]
    async fn duplicate_conflict_is_treated_as_seeded() {
        // Simulates losing the check-then-act race: the count reads zero but
        // the insert collides with a concurrent process start.
        let manager = MockAccountManager::new().failing_create(IdentityError::DuplicateAccount);

        seed_baseline_account(&manager).await.unwrap();
        assert_eq!(manager.create_calls(), 1);
    }

    #[tokio::test]
    async fn other_creation_failures_surface() {
        let manager = MockAccountManager::new()
            .failing_create(IdentityError::Database("connection reset".to_string()));

        let err = seed_baseline_account(&manager).await.unwrap_err();
        assert!(matches!(err, IdentityError::Database(_)));
    }

    #[tokio::test]
    async fn baseline_password_satisfies_policy() {
        // The mock enforces the same policy as the production manager; a
        // policy drift would make first deployment unseedable.
        let manager = MockAccountManager::new();
        manager
            .create_account(&baseline_account(), BASELINE_PASSWORD)
            .await
            .unwrap();
    }
}

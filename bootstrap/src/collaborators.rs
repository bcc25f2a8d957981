//! Production collaborators for the orchestrator.
//!
//! Thin adapters that bind the store crates' migration and seeding entry
//! points to the [`SchemaMigrator`] / [`BaselineSeeder`] traits. Each one is
//! handed to [`crate::Orchestrator::new`] explicitly by the binary.

use crate::orchestrator::{BaselineSeeder, SchemaMigrator};
use souq_catalog::CatalogStore;
use souq_identity::{AccountManager, PostgresAccountManager};

/// Migrates the catalog store.
pub struct CatalogMigrator {
    store: CatalogStore,
}

impl CatalogMigrator {
    /// Wrap a catalog store handle.
    #[must_use]
    pub const fn new(store: CatalogStore) -> Self {
        Self { store }
    }
}

impl SchemaMigrator for CatalogMigrator {
    fn store(&self) -> &'static str {
        "catalog"
    }

    async fn apply(&self) -> anyhow::Result<()> {
        self.store.migrate().await?;
        Ok(())
    }
}

/// Migrates the identity store.
pub struct IdentityMigrator {
    manager: PostgresAccountManager,
}

impl IdentityMigrator {
    /// Wrap an identity store handle.
    #[must_use]
    pub const fn new(manager: PostgresAccountManager) -> Self {
        Self { manager }
    }
}

impl SchemaMigrator for IdentityMigrator {
    fn store(&self) -> &'static str {
        "identity"
    }

    async fn apply(&self) -> anyhow::Result<()> {
        self.manager.migrate().await?;
        Ok(())
    }
}

/// Seeds baseline catalog reference data.
pub struct CatalogSeeder {
    store: CatalogStore,
}

impl CatalogSeeder {
    /// Wrap a catalog store handle.
    #[must_use]
    pub const fn new(store: CatalogStore) -> Self {
        Self { store }
    }
}

impl BaselineSeeder for CatalogSeeder {
    fn target(&self) -> &'static str {
        "catalog-baseline"
    }

    async fn seed(&self) -> anyhow::Result<()> {
        souq_catalog::seed::seed_baseline(&self.store).await?;
        Ok(())
    }
}

/// Seeds the baseline identity account.
pub struct AccountSeeder<M> {
    manager: M,
}

impl<M: AccountManager> AccountSeeder<M> {
    /// Wrap an identity management handle.
    pub const fn new(manager: M) -> Self {
        Self { manager }
    }
}

impl<M: AccountManager> BaselineSeeder for AccountSeeder<M> {
    fn target(&self) -> &'static str {
        "identity-baseline"
    }

    async fn seed(&self) -> anyhow::Result<()> {
        souq_identity::seed::seed_baseline_account(&self.manager).await?;
        Ok(())
    }
}

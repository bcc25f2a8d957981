//! Bootstrap orchestrator state machine.
//!
//! Runs once per process start: **Migrating** (catalog store, then identity
//! store) followed by **Seeding** (catalog baseline, then baseline account),
//! each step sequential and bounded by a timeout. The two terminal states
//! both let the process proceed to serving traffic:
//!
//! - [`BootReport::Ready`] — every step completed.
//! - [`BootReport::Degraded`] — a step failed or timed out; the failure is
//!   logged exactly once with full context and the process serves with
//!   whatever state exists. A transient store outage during startup should
//!   not take down read paths that do not depend on the missing data.
//!
//! Nothing below the orchestrator retries, and the orchestrator itself does
//! not retry either: one attempt per process start.

use std::fmt;
use std::future::Future;
use std::time::Duration;
use tracing::{error, info};

/// Default upper bound for each migration/seed step.
pub const DEFAULT_STEP_TIMEOUT: Duration = Duration::from_secs(120);

/// Applies pending schema migrations for one relational store.
pub trait SchemaMigrator: Send + Sync {
    /// Store label, used in logs and reports.
    fn store(&self) -> &'static str;

    /// Apply all pending migrations, returning once the schema is current.
    ///
    /// Idempotent against an already-current schema.
    ///
    /// # Errors
    ///
    /// Surfaces the migration engine's failure; partial application state is
    /// the store's own transactional concern.
    async fn apply(&self) -> anyhow::Result<()>;
}

/// Idempotently ensures baseline data exists in one store.
pub trait BaselineSeeder: Send + Sync {
    /// Target label, used in logs and reports.
    fn target(&self) -> &'static str;

    /// Ensure baseline records exist; a no-op when the target already
    /// satisfies the baseline.
    ///
    /// # Errors
    ///
    /// Surfaces the first seeding failure without retrying.
    async fn seed(&self) -> anyhow::Result<()>;
}

/// Bootstrap phase in which a step runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootPhase {
    /// Applying schema migrations.
    Migrating,
    /// Seeding baseline data.
    Seeding,
}

impl fmt::Display for BootPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Migrating => f.write_str("migrating"),
            Self::Seeding => f.write_str("seeding"),
        }
    }
}

/// The failure captured when bootstrap degrades.
#[derive(Debug)]
pub struct ContainedFailure {
    /// Phase the failing step belonged to.
    pub phase: BootPhase,
    /// Label of the failing step.
    pub step: &'static str,
    /// Underlying error.
    pub error: anyhow::Error,
}

/// Terminal state of the bootstrap phase.
///
/// Both variants signal the process to proceed to serving traffic; the
/// distinction exists for operator visibility, not control flow.
#[derive(Debug)]
pub enum BootReport {
    /// Every migration and seed step completed.
    Ready,
    /// A step failed; the process serves with existing (possibly stale or
    /// partial) data.
    Degraded(ContainedFailure),
}

impl BootReport {
    /// Whether bootstrap completed without a contained failure.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    /// The contained failure, if bootstrap degraded.
    #[must_use]
    pub const fn failure(&self) -> Option<&ContainedFailure> {
        match self {
            Self::Ready => None,
            Self::Degraded(failure) => Some(failure),
        }
    }
}

/// Bootstrap orchestrator.
///
/// Receives all collaborators as explicit constructor arguments; nothing is
/// resolved from ambient process-wide state.
pub struct Orchestrator<CM, IM, CS, AS> {
    catalog_migrator: CM,
    identity_migrator: IM,
    catalog_seeder: CS,
    account_seeder: AS,
    step_timeout: Duration,
}

impl<CM, IM, CS, AS> Orchestrator<CM, IM, CS, AS>
where
    CM: SchemaMigrator,
    IM: SchemaMigrator,
    CS: BaselineSeeder,
    AS: BaselineSeeder,
{
    /// Assemble the orchestrator from its collaborators.
    pub const fn new(
        catalog_migrator: CM,
        identity_migrator: IM,
        catalog_seeder: CS,
        account_seeder: AS,
    ) -> Self {
        Self {
            catalog_migrator,
            identity_migrator,
            catalog_seeder,
            account_seeder,
            step_timeout: DEFAULT_STEP_TIMEOUT,
        }
    }

    /// Override the per-step timeout.
    #[must_use]
    pub const fn with_step_timeout(mut self, timeout: Duration) -> Self {
        self.step_timeout = timeout;
        self
    }

    /// Run the bootstrap sequence to a terminal state.
    ///
    /// Never panics and never escapes an error: the worst outcome is
    /// [`BootReport::Degraded`].
    pub async fn run(&self) -> BootReport {
        if let Err(failure) = self.migrate().await {
            return Self::degrade(failure);
        }
        if let Err(failure) = self.seed().await {
            return Self::degrade(failure);
        }

        info!("bootstrap complete");
        BootReport::Ready
    }

    /// Migrate the catalog store, then the identity store. The order is a
    /// correctness requirement: seeding assumes catalog schema availability
    /// before the identity store is touched.
    async fn migrate(&self) -> Result<(), ContainedFailure> {
        self.step(
            BootPhase::Migrating,
            self.catalog_migrator.store(),
            self.catalog_migrator.apply(),
        )
        .await?;
        self.step(
            BootPhase::Migrating,
            self.identity_migrator.store(),
            self.identity_migrator.apply(),
        )
        .await
    }

    async fn seed(&self) -> Result<(), ContainedFailure> {
        self.step(
            BootPhase::Seeding,
            self.catalog_seeder.target(),
            self.catalog_seeder.seed(),
        )
        .await?;
        self.step(
            BootPhase::Seeding,
            self.account_seeder.target(),
            self.account_seeder.seed(),
        )
        .await
    }

    async fn step(
        &self,
        phase: BootPhase,
        step: &'static str,
        work: impl Future<Output = anyhow::Result<()>>,
    ) -> Result<(), ContainedFailure> {
        info!(%phase, step, "bootstrap step starting");
        match tokio::time::timeout(self.step_timeout, work).await {
            Ok(Ok(())) => {
                info!(%phase, step, "bootstrap step complete");
                Ok(())
            }
            Ok(Err(error)) => Err(ContainedFailure { phase, step, error }),
            Err(_) => Err(ContainedFailure {
                phase,
                step,
                error: anyhow::anyhow!(
                    "step did not finish within {:?}",
                    self.step_timeout
                ),
            }),
        }
    }

    /// The single place a contained failure is recorded.
    fn degrade(failure: ContainedFailure) -> BootReport {
        error!(
            phase = %failure.phase,
            step = failure.step,
            error = ?failure.error,
            "bootstrap degraded; serving with existing data"
        );
        BootReport::Degraded(failure)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct CallLog(Arc<Mutex<Vec<&'static str>>>);

    impl CallLog {
        fn record(&self, step: &'static str) {
            self.0.lock().unwrap().push(step);
        }

        fn calls(&self) -> Vec<&'static str> {
            self.0.lock().unwrap().clone()
        }
    }

    struct RecordingMigrator {
        name: &'static str,
        log: CallLog,
        fail: bool,
    }

    impl SchemaMigrator for RecordingMigrator {
        fn store(&self) -> &'static str {
            self.name
        }

        async fn apply(&self) -> anyhow::Result<()> {
            self.log.record(self.name);
            if self.fail {
                anyhow::bail!("migration engine rejected {}", self.name);
            }
            Ok(())
        }
    }

    struct HangingMigrator;

    impl SchemaMigrator for HangingMigrator {
        fn store(&self) -> &'static str {
            "catalog"
        }

        async fn apply(&self) -> anyhow::Result<()> {
            std::future::pending::<()>().await;
            Ok(())
        }
    }

    struct RecordingSeeder {
        name: &'static str,
        log: CallLog,
        fail: bool,
    }

    impl BaselineSeeder for RecordingSeeder {
        fn target(&self) -> &'static str {
            self.name
        }

        async fn seed(&self) -> anyhow::Result<()> {
            self.log.record(self.name);
            if self.fail {
                anyhow::bail!("seeding {} failed", self.name);
            }
            Ok(())
        }
    }

    fn migrator(name: &'static str, log: &CallLog, fail: bool) -> RecordingMigrator {
        RecordingMigrator {
            name,
            log: log.clone(),
            fail,
        }
    }

    fn seeder(name: &'static str, log: &CallLog, fail: bool) -> RecordingSeeder {
        RecordingSeeder {
            name,
            log: log.clone(),
            fail,
        }
    }

    #[tokio::test]
    async fn ready_path_runs_every_step_in_order() {
        let log = CallLog::default();
        let report = Orchestrator::new(
            migrator("catalog", &log, false),
            migrator("identity", &log, false),
            seeder("catalog-baseline", &log, false),
            seeder("identity-baseline", &log, false),
        )
        .run()
        .await;

        assert!(report.is_ready());
        assert_eq!(
            log.calls(),
            vec!["catalog", "identity", "catalog-baseline", "identity-baseline"]
        );
    }

    #[tokio::test]
    async fn catalog_store_migrates_before_identity_store() {
        let log = CallLog::default();
        Orchestrator::new(
            migrator("catalog", &log, false),
            migrator("identity", &log, false),
            seeder("catalog-baseline", &log, false),
            seeder("identity-baseline", &log, false),
        )
        .run()
        .await;

        let calls = log.calls();
        let catalog = calls.iter().position(|&c| c == "catalog").unwrap();
        let identity = calls.iter().position(|&c| c == "identity").unwrap();
        assert!(catalog < identity);
    }

    #[tokio::test]
    async fn identity_migration_failure_degrades_and_skips_seeding() {
        let log = CallLog::default();
        let report = Orchestrator::new(
            migrator("catalog", &log, false),
            migrator("identity", &log, true),
            seeder("catalog-baseline", &log, false),
            seeder("identity-baseline", &log, false),
        )
        .run()
        .await;

        let failure = report.failure().unwrap();
        assert_eq!(failure.phase, BootPhase::Migrating);
        assert_eq!(failure.step, "identity");
        // Seeding never starts once migration has failed.
        assert_eq!(log.calls(), vec!["catalog", "identity"]);
    }

    #[tokio::test]
    async fn catalog_seeding_failure_degrades_and_skips_account_seeding() {
        let log = CallLog::default();
        let report = Orchestrator::new(
            migrator("catalog", &log, false),
            migrator("identity", &log, false),
            seeder("catalog-baseline", &log, true),
            seeder("identity-baseline", &log, false),
        )
        .run()
        .await;

        let failure = report.failure().unwrap();
        assert_eq!(failure.phase, BootPhase::Seeding);
        assert_eq!(failure.step, "catalog-baseline");
        assert_eq!(log.calls(), vec!["catalog", "identity", "catalog-baseline"]);
    }

    #[tokio::test]
    async fn hung_step_degrades_instead_of_blocking_startup() {
        let log = CallLog::default();
        let report = Orchestrator::new(
            HangingMigrator,
            migrator("identity", &log, false),
            seeder("catalog-baseline", &log, false),
            seeder("identity-baseline", &log, false),
        )
        .with_step_timeout(Duration::from_millis(20))
        .run()
        .await;

        let failure = report.failure().unwrap();
        assert_eq!(failure.phase, BootPhase::Migrating);
        assert!(failure.error.to_string().contains("did not finish"));
        // Nothing after the hung step ran.
        assert!(log.calls().is_empty());
    }

    #[tokio::test]
    async fn degraded_report_carries_the_failure_exactly_once() {
        let log = CallLog::default();
        let report = Orchestrator::new(
            migrator("catalog", &log, true),
            migrator("identity", &log, false),
            seeder("catalog-baseline", &log, false),
            seeder("identity-baseline", &log, false),
        )
        .run()
        .await;

        assert!(!report.is_ready());
        let failure = report.failure().unwrap();
        assert_eq!(failure.step, "catalog");
        // One attempt per process start: the failing step ran once and was
        // not retried.
        assert_eq!(log.calls(), vec!["catalog"]);
    }
}

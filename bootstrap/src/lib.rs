//! Startup orchestration for the souq storefront API.
//!
//! This crate owns the bootstrap phase that runs exactly once per process
//! start, strictly before the HTTP listener binds:
//!
//! 1. [`Config::from_env`] — load configuration; missing or malformed
//!    connection info is fatal.
//! 2. [`Resources::connect`] — build the process-lifetime store handles
//!    (catalog pool, identity pool, cache connection); failure is fatal.
//! 3. [`Orchestrator::run`] — migrate the catalog store, migrate the identity
//!    store, seed catalog baseline data, seed the baseline account, in that
//!    order. Any failure is *contained*: it is logged once and the process
//!    proceeds to serve with whatever state exists.
//!
//! The orchestrator receives its collaborators as explicit constructor
//! arguments — there is no ambient service registry — and every phase reports
//! by return value rather than by unwinding.

pub mod collaborators;
pub mod config;
pub mod orchestrator;
pub mod resources;

pub use collaborators::{AccountSeeder, CatalogMigrator, CatalogSeeder, IdentityMigrator};
pub use config::{Config, ConfigError};
pub use orchestrator::{
    BaselineSeeder, BootPhase, BootReport, ContainedFailure, Orchestrator, SchemaMigrator,
};
pub use resources::{ResourceError, Resources};

//! Catalog store for the souq storefront API.
//!
//! This crate owns the catalog side of persistence: the product/brand/type
//! entities, the embedded schema migrations, a thin query layer over a
//! process-lifetime `PgPool`, and the baseline seeder that populates
//! reference data from embedded JSON documents on first start.
//!
//! # Example
//!
//! ```ignore
//! use souq_catalog::CatalogStore;
//!
//! # async fn example(pool: sqlx::PgPool) -> Result<(), Box<dyn std::error::Error>> {
//! let store = CatalogStore::new(pool);
//! store.migrate().await?;
//! souq_catalog::seed::seed_baseline(&store).await?;
//! # Ok(())
//! # }
//! ```

pub mod entities;
pub mod error;
pub mod seed;
pub mod store;

pub use entities::{Brand, Product, ProductType};
pub use error::{CatalogError, Result};
pub use store::CatalogStore;

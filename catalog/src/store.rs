//! Query layer over the catalog store handle.
//!
//! `CatalogStore` wraps the process-lifetime `PgPool` for the catalog
//! database. The pool is created once at startup by the bootstrap layer and
//! shared by request handlers for the rest of the process life; individual
//! queries check a connection out per call.

use crate::entities::Product;
use crate::error::{CatalogError, Result};
use sqlx::PgPool;

const LIST_PRODUCTS: &str = "\
    SELECT p.id, p.name, p.description, p.price, p.picture_url, \
           b.name AS brand, t.name AS product_type \
    FROM products p \
    JOIN brands b ON b.id = p.brand_id \
    JOIN product_types t ON t.id = p.type_id \
    ORDER BY p.name";

/// Catalog store handle.
#[derive(Clone)]
pub struct CatalogStore {
    /// Connection pool, one per process.
    pub(crate) pool: PgPool,
}

impl CatalogStore {
    /// Create a new catalog store over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply all pending catalog schema migrations.
    ///
    /// Blocking in the sense of the bootstrap sequence: returns only once the
    /// schema is current. Running against an already-current schema is a
    /// no-op.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Migration`] if a migration cannot be applied;
    /// partial application state is the database's transactional concern.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| CatalogError::Migration(e.to_string()))?;
        Ok(())
    }

    /// List all products with their brand and type names.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Database`] if the query fails.
    pub async fn list_products(&self) -> Result<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(LIST_PRODUCTS)
            .fetch_all(&self.pool)
            .await?;
        Ok(products)
    }

    /// Fetch a single product by id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Database`] if the query fails.
    pub async fn product(&self, id: i64) -> Result<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(PRODUCT_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(product)
    }
}

const PRODUCT_BY_ID: &str = "\
    SELECT p.id, p.name, p.description, p.price, p.picture_url, \
           b.name AS brand, t.name AS product_type \
    FROM products p \
    JOIN brands b ON b.id = p.brand_id \
    JOIN product_types t ON t.id = p.type_id \
    WHERE p.id = $1";

//! Connection provisioning for the backing stores.
//!
//! Builds one long-lived handle per store from configuration: a `PgPool` each
//! for the catalog and identity databases and the multiplexed Redis
//! connection for the basket cache. Handles are created once here and shared
//! for the rest of the process life; any failure is fatal, since a backend
//! without its store handles must not accept traffic.

use crate::config::{Config, PostgresConfig};
use souq_basket::{BasketError, BasketStore};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// Fatal provisioning error.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The catalog store could not be reached.
    #[error("Failed to connect to catalog store")]
    Catalog(#[source] sqlx::Error),

    /// The identity store could not be reached.
    #[error("Failed to connect to identity store")]
    Identity(#[source] sqlx::Error),

    /// The basket cache could not be reached.
    #[error("Failed to connect to basket cache")]
    Cache(#[from] BasketError),
}

/// Process-lifetime store handles.
#[derive(Clone)]
pub struct Resources {
    /// Catalog (business data) pool.
    pub catalog_pool: PgPool,
    /// Identity pool.
    pub identity_pool: PgPool,
    /// Basket cache handle.
    pub baskets: BasketStore,
}

impl Resources {
    /// Connect every backing store.
    ///
    /// # Errors
    ///
    /// Returns the first connection failure; nothing is retried here.
    pub async fn connect(config: &Config) -> Result<Self, ResourceError> {
        info!(url = %config.catalog.url, "Connecting to catalog store");
        let catalog_pool = pool(&config.catalog).await.map_err(ResourceError::Catalog)?;
        info!("Catalog store connected");

        info!(url = %config.identity.url, "Connecting to identity store");
        let identity_pool = pool(&config.identity)
            .await
            .map_err(ResourceError::Identity)?;
        info!("Identity store connected");

        info!("Connecting to basket cache");
        let baskets = BasketStore::connect(&config.cache.url).await?;
        info!("Basket cache connected");

        Ok(Self {
            catalog_pool,
            identity_pool,
            baskets,
        })
    }
}

async fn pool(config: &PostgresConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout))
        .connect(&config.url)
        .await
}

//! Redis basket store.
//!
//! Keys are laid out as `basket:{id}`. Every write refreshes a 30-day TTL so
//! abandoned baskets expire on their own.

use crate::basket::CustomerBasket;
use crate::error::{BasketError, Result};
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};

/// Sliding basket lifetime.
const BASKET_TTL_SECS: u64 = 30 * 24 * 60 * 60;

/// Redis-backed basket store.
///
/// Holds the process-lifetime multiplexed connection; operations clone the
/// manager, which shares the underlying connection.
#[derive(Clone)]
pub struct BasketStore {
    /// Multiplexed connection handle.
    conn_manager: ConnectionManager,
}

impl std::fmt::Debug for BasketStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasketStore").finish_non_exhaustive()
    }
}

impl BasketStore {
    /// Connect to the cache and build the process-lifetime handle.
    ///
    /// # Errors
    ///
    /// Returns [`BasketError::Connection`] if the URL is malformed or the
    /// server is unreachable. Callers treat this as fatal at startup.
    pub async fn connect(redis_url: &str) -> Result<Self> {
        let client = Client::open(redis_url)
            .map_err(|e| BasketError::Connection(format!("invalid cache URL: {e}")))?;

        let conn_manager = ConnectionManager::new(client)
            .await
            .map_err(|e| BasketError::Connection(e.to_string()))?;

        Ok(Self { conn_manager })
    }

    /// Redis key for a basket id.
    fn basket_key(id: &str) -> String {
        format!("basket:{id}")
    }

    /// Fetch a basket by id.
    ///
    /// # Errors
    ///
    /// Returns error if the cache command fails or the stored document is not
    /// valid JSON.
    pub async fn basket(&self, id: &str) -> Result<Option<CustomerBasket>> {
        let mut conn = self.conn_manager.clone();
        let raw: Option<String> = conn
            .get(Self::basket_key(id))
            .await
            .map_err(|e| BasketError::Cache(format!("Failed to read basket: {e}")))?;

        raw.map(|json| {
            serde_json::from_str(&json).map_err(|e| BasketError::Serialization(e.to_string()))
        })
        .transpose()
    }

    /// Store a basket, replacing any previous contents and refreshing its TTL.
    ///
    /// # Errors
    ///
    /// Returns error if serialization or the cache command fails.
    pub async fn update_basket(&self, basket: &CustomerBasket) -> Result<()> {
        let json =
            serde_json::to_string(basket).map_err(|e| BasketError::Serialization(e.to_string()))?;

        let mut conn = self.conn_manager.clone();
        let _: () = conn
            .set_ex(Self::basket_key(&basket.id), json, BASKET_TTL_SECS)
            .await
            .map_err(|e| BasketError::Cache(format!("Failed to write basket: {e}")))?;

        tracing::debug!(basket_id = %basket.id, items = basket.items.len(), "basket updated");
        Ok(())
    }

    /// Delete a basket. Returns whether a basket existed.
    ///
    /// # Errors
    ///
    /// Returns error if the cache command fails.
    pub async fn delete_basket(&self, id: &str) -> Result<bool> {
        let mut conn = self.conn_manager.clone();
        let removed: i64 = conn
            .del(Self::basket_key(id))
            .await
            .map_err(|e| BasketError::Cache(format!("Failed to delete basket: {e}")))?;
        Ok(removed > 0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn basket_keys_are_namespaced() {
        assert_eq!(BasketStore::basket_key("abc-123"), "basket:abc-123");
    }

    #[tokio::test]
    async fn empty_connection_string_fails_fast() {
        let err = BasketStore::connect("").await.unwrap_err();
        assert!(matches!(err, BasketError::Connection(_)));
    }
}

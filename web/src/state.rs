//! Application state shared across HTTP handlers.

use souq_basket::BasketStore;
use souq_bootstrap::BootReport;
use souq_catalog::CatalogStore;
use std::sync::Arc;

/// Shared state handed to every handler.
///
/// The store handles inside are the process-lifetime ones built during
/// bootstrap; relational access is scoped per request by checking a
/// connection out of the pool, while the basket cache handle is the one
/// multiplexed connection shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Catalog store handle.
    pub catalog: CatalogStore,
    /// Basket cache handle.
    pub baskets: BasketStore,
    /// Terminal state of the bootstrap phase, for `/health`.
    pub boot: Arc<BootReport>,
}

impl AppState {
    /// Assemble application state after bootstrap has completed.
    #[must_use]
    pub const fn new(catalog: CatalogStore, baskets: BasketStore, boot: Arc<BootReport>) -> Self {
        Self {
            catalog,
            baskets,
            boot,
        }
    }
}

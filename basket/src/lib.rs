//! Redis-backed basket cache for the souq storefront API.
//!
//! The cache handle is a single multiplexed [`redis::aio::ConnectionManager`]
//! created once at startup and cloned per operation — it is never rebuilt per
//! request, and reconnect-on-drop is the manager's own concern. Baskets are
//! stored as JSON documents with a sliding TTL.

pub mod basket;
pub mod error;
pub mod store;

pub use basket::{BasketItem, CustomerBasket};
pub use error::{BasketError, Result};
pub use store::BasketStore;

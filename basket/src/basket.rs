//! Basket document types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A customer's shopping basket, keyed by a client-chosen identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerBasket {
    /// Client-chosen basket identifier.
    pub id: String,
    /// Basket contents.
    #[serde(default)]
    pub items: Vec<BasketItem>,
}

impl CustomerBasket {
    /// Create an empty basket.
    #[must_use]
    pub const fn new(id: String) -> Self {
        Self { id, items: Vec::new() }
    }

    /// Total price across all items.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items
            .iter()
            .map(|item| item.price * Decimal::from(item.quantity))
            .sum()
    }
}

/// A single line in a basket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasketItem {
    /// Catalog product id.
    pub product_id: i64,
    /// Product name at the time it was added.
    pub name: String,
    /// Unit price at the time it was added.
    pub price: Decimal,
    /// Quantity ordered.
    pub quantity: u32,
    /// Product picture URL.
    #[serde(default)]
    pub picture_url: String,
    /// Brand name.
    #[serde(default)]
    pub brand: String,
    /// Type name.
    #[serde(default)]
    pub product_type: String,
}

//! Catalog entities.

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// A product brand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Brand {
    /// Database identifier.
    pub id: i64,
    /// Unique brand name.
    pub name: String,
}

/// A product type (category).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct ProductType {
    /// Database identifier.
    pub id: i64,
    /// Unique type name.
    pub name: String,
}

/// A catalog product, denormalized with its brand and type names for listing.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Product {
    /// Database identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Short description.
    pub description: String,
    /// Unit price.
    pub price: Decimal,
    /// Relative URL of the product picture.
    pub picture_url: String,
    /// Brand name.
    pub brand: String,
    /// Type name.
    pub product_type: String,
}

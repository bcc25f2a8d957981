//! Baseline catalog seeding.
//!
//! Populates reference data (brands, product types, products) from JSON
//! documents embedded at compile time. Seeding is checks-before-insert: each
//! table is written only when it is currently empty, so the seeder is safe to
//! invoke on every process start and leaves a store that already has data
//! untouched.

use crate::error::{CatalogError, Result};
use crate::store::CatalogStore;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, info};

const BRANDS_JSON: &str = include_str!("../seed/brands.json");
const TYPES_JSON: &str = include_str!("../seed/types.json");
const PRODUCTS_JSON: &str = include_str!("../seed/products.json");

/// Seed row carrying only a unique name (brands, product types).
#[derive(Debug, Deserialize)]
struct NamedSeed {
    name: String,
}

/// Product seed row; brand and type are referenced by name and resolved
/// against the already-seeded lookup tables.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductSeed {
    name: String,
    description: String,
    price: Decimal,
    picture_url: String,
    brand: String,
    #[serde(rename = "type")]
    product_type: String,
}

/// Ensure the baseline catalog exists.
///
/// Order matters: brands and types are lookup targets for products, so they
/// are seeded first.
///
/// # Errors
///
/// Returns an error if a seed document is malformed, a product references a
/// name missing from the lookup tables, or a query fails. The caller decides
/// what a failed attempt means; this function never retries.
pub async fn seed_baseline(store: &CatalogStore) -> Result<()> {
    seed_named(store, "brands", BRANDS_JSON, "brands.json").await?;
    seed_named(store, "product_types", TYPES_JSON, "types.json").await?;
    seed_products(store).await?;
    Ok(())
}

async fn seed_named(
    store: &CatalogStore,
    table: &'static str,
    raw: &'static str,
    document: &'static str,
) -> Result<()> {
    let existing = count_rows(store, table).await?;
    if existing > 0 {
        debug!(table, existing, "baseline already present, skipping");
        return Ok(());
    }

    let rows = parse_named(document, raw)?;
    let mut tx = store.pool.begin().await?;
    for row in &rows {
        sqlx::query(&format!("INSERT INTO {table} (name) VALUES ($1)"))
            .bind(&row.name)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;

    info!(table, seeded = rows.len(), "baseline rows inserted");
    Ok(())
}

async fn seed_products(store: &CatalogStore) -> Result<()> {
    let existing = count_rows(store, "products").await?;
    if existing > 0 {
        debug!(table = "products", existing, "baseline already present, skipping");
        return Ok(());
    }

    let rows = parse_products()?;
    let mut tx = store.pool.begin().await?;
    for row in &rows {
        let brand_id = resolve_id(&mut tx, "brands", &row.brand)
            .await?
            .ok_or_else(|| CatalogError::DanglingSeedReference {
                row: row.name.clone(),
                kind: "brand",
                name: row.brand.clone(),
            })?;
        let type_id = resolve_id(&mut tx, "product_types", &row.product_type)
            .await?
            .ok_or_else(|| CatalogError::DanglingSeedReference {
                row: row.name.clone(),
                kind: "type",
                name: row.product_type.clone(),
            })?;

        sqlx::query(
            "INSERT INTO products (name, description, price, picture_url, brand_id, type_id) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(&row.name)
        .bind(&row.description)
        .bind(row.price)
        .bind(&row.picture_url)
        .bind(brand_id)
        .bind(type_id)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;

    info!(table = "products", seeded = rows.len(), "baseline rows inserted");
    Ok(())
}

async fn count_rows(store: &CatalogStore, table: &'static str) -> Result<i64> {
    let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(&store.pool)
        .await?;
    Ok(count)
}

async fn resolve_id(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    table: &'static str,
    name: &str,
) -> Result<Option<i64>> {
    let id: Option<i64> = sqlx::query_scalar(&format!("SELECT id FROM {table} WHERE name = $1"))
        .bind(name)
        .fetch_optional(&mut **tx)
        .await?;
    Ok(id)
}

fn parse_named(document: &'static str, raw: &str) -> Result<Vec<NamedSeed>> {
    serde_json::from_str(raw).map_err(|e| CatalogError::MalformedSeed {
        document,
        reason: e.to_string(),
    })
}

fn parse_products() -> Result<Vec<ProductSeed>> {
    serde_json::from_str(PRODUCTS_JSON).map_err(|e| CatalogError::MalformedSeed {
        document: "products.json",
        reason: e.to_string(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn brand_seed_parses_with_unique_names() {
        let brands = parse_named("brands.json", BRANDS_JSON).unwrap();
        assert!(!brands.is_empty());

        let names: HashSet<&str> = brands.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names.len(), brands.len());
    }

    #[test]
    fn type_seed_parses_with_unique_names() {
        let types = parse_named("types.json", TYPES_JSON).unwrap();
        assert!(!types.is_empty());

        let names: HashSet<&str> = types.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names.len(), types.len());
    }

    #[test]
    fn product_seed_references_resolve_within_baseline() {
        let brands = parse_named("brands.json", BRANDS_JSON).unwrap();
        let types = parse_named("types.json", TYPES_JSON).unwrap();
        let products = parse_products().unwrap();
        assert!(!products.is_empty());

        let brand_names: HashSet<&str> = brands.iter().map(|b| b.name.as_str()).collect();
        let type_names: HashSet<&str> = types.iter().map(|t| t.name.as_str()).collect();

        for product in &products {
            assert!(
                brand_names.contains(product.brand.as_str()),
                "{} references unknown brand {}",
                product.name,
                product.brand
            );
            assert!(
                type_names.contains(product.product_type.as_str()),
                "{} references unknown type {}",
                product.name,
                product.product_type
            );
            assert!(product.price > Decimal::ZERO);
        }
    }
}

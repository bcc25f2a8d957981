//! Catalog endpoints.

use crate::WebResult;
use crate::error::AppError;
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, State};
use souq_catalog::Product;

/// `GET /api/products`
pub async fn list_products(State(state): State<AppState>) -> WebResult<Json<Vec<Product>>> {
    Ok(Json(state.catalog.list_products().await?))
}

/// `GET /api/products/{id}`
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> WebResult<Json<Product>> {
    let product = state
        .catalog
        .product(id)
        .await?
        .ok_or_else(|| AppError::not_found("Product", id))?;
    Ok(Json(product))
}

//! Basket endpoints.
//!
//! A missing basket reads as an empty one: clients create baskets implicitly
//! by fetching, then replace contents wholesale with `POST /api/basket`.

use crate::WebResult;
use crate::error::AppError;
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use souq_basket::CustomerBasket;

/// `GET /api/basket/{id}`
pub async fn get_basket(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> WebResult<Json<CustomerBasket>> {
    let basket = state
        .baskets
        .basket(&id)
        .await?
        .unwrap_or_else(|| CustomerBasket::new(id));
    Ok(Json(basket))
}

/// `POST /api/basket`
pub async fn update_basket(
    State(state): State<AppState>,
    Json(basket): Json<CustomerBasket>,
) -> WebResult<Json<CustomerBasket>> {
    if basket.id.trim().is_empty() {
        return Err(AppError::bad_request("basket id must not be empty"));
    }
    state.baskets.update_basket(&basket).await?;
    Ok(Json(basket))
}

/// `DELETE /api/basket/{id}`
pub async fn delete_basket(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> WebResult<StatusCode> {
    state.baskets.delete_basket(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

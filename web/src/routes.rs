//! Route table.

use crate::error::AppError;
use crate::handlers::{basket, health, products};
use crate::middleware::request_span;
use crate::state::AppState;
use axum::http::{StatusCode, Uri};
use axum::routing::{get, post};
use axum::{Router, middleware};

/// Build the HTTP router over already-bootstrapped state.
#[must_use]
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/products", get(products::list_products))
        .route("/api/products/:id", get(products::get_product))
        .route("/api/basket", post(basket::update_basket))
        .route(
            "/api/basket/:id",
            get(basket::get_basket).delete(basket::delete_basket),
        )
        .fallback(not_found)
        .layer(middleware::from_fn(request_span))
        .with_state(state)
}

/// JSON 404 for unknown routes, replacing the framework's bare status page.
async fn not_found(uri: Uri) -> AppError {
    AppError::new(
        StatusCode::NOT_FOUND,
        format!("No endpoint at {}", uri.path()),
    )
}

//! Axum request pipeline for the souq storefront API.
//!
//! This crate is the boundary between the bootstrap core and HTTP traffic:
//! it translates domain errors into JSON responses, tags every request with
//! an id and a tracing span, and exposes the routes. The one strict contract
//! with the bootstrap core is sequencing — [`routes::build_router`] is only
//! called, and the listener only bound, after the bootstrap phase has reached
//! a terminal state. The resulting [`souq_bootstrap::BootReport`] is carried
//! in [`AppState`] so `/health` can report a degraded start.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::AppError;
pub use routes::build_router;
pub use state::AppState;

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;

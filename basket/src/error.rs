//! Error types for basket cache operations.

use thiserror::Error;

/// Result type alias for basket operations.
pub type Result<T> = std::result::Result<T, BasketError>;

/// Error taxonomy for the basket cache.
#[derive(Debug, Error)]
pub enum BasketError {
    /// The cache connection could not be established.
    ///
    /// Raised only at startup; a backend without a cache handle must not
    /// serve traffic.
    #[error("Failed to connect to cache: {0}")]
    Connection(String),

    /// A cache command failed after startup.
    #[error("Cache error: {0}")]
    Cache(String),

    /// A stored basket document could not be read or written as JSON.
    #[error("Basket serialization error: {0}")]
    Serialization(String),
}

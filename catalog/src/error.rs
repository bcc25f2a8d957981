//! Error types for catalog store operations.

use thiserror::Error;

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Error taxonomy for the catalog store.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Database query or connection failure.
    #[error("Database error: {0}")]
    Database(String),

    /// Schema migration failure.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// An embedded seed document could not be parsed.
    #[error("Malformed seed document {document}: {reason}")]
    MalformedSeed {
        /// Seed document name.
        document: &'static str,
        /// Parse failure detail.
        reason: String,
    },

    /// A seed row references a brand or type that is not in the baseline set.
    #[error("Seed row {row} references unknown {kind} {name}")]
    DanglingSeedReference {
        /// Product name of the offending row.
        row: String,
        /// Referenced kind ("brand" or "type").
        kind: &'static str,
        /// Referenced name that could not be resolved.
        name: String,
    },
}

impl From<sqlx::Error> for CatalogError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}

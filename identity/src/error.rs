//! Error types for identity store operations.

use thiserror::Error;

/// Result type alias for identity operations.
pub type Result<T> = std::result::Result<T, IdentityError>;

/// Error taxonomy for the identity store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// Database query or connection failure.
    #[error("Database error: {0}")]
    Database(String),

    /// Schema migration failure.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Username or email collides with an existing account.
    #[error("An account with this username or email already exists")]
    DuplicateAccount,

    /// Password rejected by the policy.
    #[error("Password rejected: {reason}")]
    PolicyViolation {
        /// Which rule failed.
        reason: &'static str,
    },

    /// Account field values rejected before hitting the store.
    #[error("Invalid account data: {0}")]
    InvalidAccount(String),
}

//! Account entity and identifier types.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Unique account identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId(pub Uuid);

impl AccountId {
    /// Generate a fresh random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A stored identity account.
///
/// Username and email are unique within the identity store; the constraints
/// live in the database schema. Credential material is never exposed on this
/// type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Identifier.
    pub id: AccountId,
    /// Unique username.
    pub username: String,
    /// Unique email address.
    pub email: String,
    /// Human-readable display name.
    pub display_name: String,
    /// Contact phone number.
    pub phone_number: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Field values for an account that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    /// Unique username.
    pub username: String,
    /// Unique email address.
    pub email: String,
    /// Human-readable display name.
    pub display_name: String,
    /// Contact phone number.
    pub phone_number: String,
}

//! Password policy and credential hashing.
//!
//! Stored credential material is `base64(salt)$base64(sha256(salt || password))`
//! with a 16-byte random salt per account. Verification recomputes the digest
//! and compares in constant time.

use crate::error::{IdentityError, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use constant_time_eq::constant_time_eq;
use sha2::{Digest, Sha256};

/// Minimum accepted password length.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Check a candidate password against the account policy.
///
/// The policy requires at least [`MIN_PASSWORD_LENGTH`] characters with at
/// least one digit, one lowercase letter, one uppercase letter, and one
/// non-alphanumeric character.
///
/// # Errors
///
/// Returns [`IdentityError::PolicyViolation`] naming the first rule that
/// failed.
pub fn validate_password(password: &str) -> Result<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(IdentityError::PolicyViolation {
            reason: "too short",
        });
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(IdentityError::PolicyViolation {
            reason: "missing digit",
        });
    }
    if !password.chars().any(char::is_lowercase) {
        return Err(IdentityError::PolicyViolation {
            reason: "missing lowercase letter",
        });
    }
    if !password.chars().any(char::is_uppercase) {
        return Err(IdentityError::PolicyViolation {
            reason: "missing uppercase letter",
        });
    }
    if password.chars().all(char::is_alphanumeric) {
        return Err(IdentityError::PolicyViolation {
            reason: "missing non-alphanumeric character",
        });
    }
    Ok(())
}

/// Hash a password with a fresh random salt.
#[must_use]
pub fn hash_password(password: &str) -> String {
    let salt: [u8; 16] = rand::random();
    let digest = salted_digest(&salt, password);
    format!("{}${}", BASE64.encode(salt), BASE64.encode(digest))
}

/// Verify a password against stored credential material.
///
/// Malformed stored material verifies as `false` rather than erroring; an
/// unreadable credential must never authenticate.
#[must_use]
pub fn verify_password(password: &str, stored: &str) -> bool {
    let Some((salt_b64, digest_b64)) = stored.split_once('$') else {
        return false;
    };
    let (Ok(salt), Ok(expected)) = (BASE64.decode(salt_b64), BASE64.decode(digest_b64)) else {
        return false;
    };
    let actual = salted_digest(&salt, password);
    constant_time_eq(&actual, &expected)
}

fn salted_digest(salt: &[u8], password: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hasher.finalize().into()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn policy_accepts_conforming_password() {
        assert!(validate_password("Pa$$w0rd").is_ok());
    }

    #[test]
    fn policy_rejects_each_missing_class() {
        let cases = [
            ("P1$a", "too short"),
            ("Password$", "missing digit"),
            ("PASSW0RD$", "missing lowercase letter"),
            ("passw0rd$", "missing uppercase letter"),
            ("Passw0rd", "missing non-alphanumeric character"),
        ];
        for (password, expected) in cases {
            match validate_password(password) {
                Err(IdentityError::PolicyViolation { reason }) => assert_eq!(reason, expected),
                other => panic!("expected policy violation for {password:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn hash_then_verify_succeeds() {
        let stored = hash_password("Pa$$w0rd");
        assert!(verify_password("Pa$$w0rd", &stored));
        assert!(!verify_password("Pa$$w0rd2", &stored));
    }

    #[test]
    fn distinct_salts_per_hash() {
        assert_ne!(hash_password("Pa$$w0rd"), hash_password("Pa$$w0rd"));
    }

    #[test]
    fn malformed_stored_material_never_verifies() {
        assert!(!verify_password("Pa$$w0rd", "not-a-credential"));
        assert!(!verify_password("Pa$$w0rd", "alsonot$base64!!"));
    }
}

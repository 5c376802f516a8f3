//! bcrypt password hashing

use crate::errors::{DomainError, DomainResult};

/// Shortest accepted plain-text password
pub const MIN_PASSWORD_LENGTH: usize = 8;
/// bcrypt ignores input past this many bytes
pub const MAX_PASSWORD_LENGTH: usize = 72;

/// Checks the length bounds of a new password
pub fn validate_password(plain: &str) -> DomainResult<()> {
    if plain.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(DomainError::validation(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }
    if plain.len() > MAX_PASSWORD_LENGTH {
        return Err(DomainError::validation(format!(
            "password must be at most {} bytes",
            MAX_PASSWORD_LENGTH
        )));
    }
    Ok(())
}

/// Hashes and verifies passwords with a fixed bcrypt cost
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl PasswordHasher {
    /// Hasher with an explicit cost (4..=31)
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    pub fn hash(&self, plain: &str) -> DomainResult<String> {
        bcrypt::hash(plain, self.cost).map_err(|e| {
            tracing::error!(error = %e, event = "password_hash_failed", "Failed to hash password");
            DomainError::internal("failed to hash password")
        })
    }

    /// Returns `false` on mismatch; only a corrupt stored hash is an error
    pub fn verify(&self, plain: &str, hashed: &str) -> DomainResult<bool> {
        bcrypt::verify(plain, hashed).map_err(|e| {
            tracing::error!(error = %e, event = "password_verify_failed", "Stored password hash is unreadable");
            DomainError::internal("failed to verify password")
        })
    }
}

use bcrypt::{hash, verify, DEFAULT_COST};
use serde::{Deserialize, Serialize};

use crate::errors::AuthError;

/// A salted bcrypt hash of an account password.
///
/// The raw password is never stored; the wrapper keeps the hash opaque
/// to the rest of the crate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Hashes a raw password with a fresh salt.
    pub fn new(raw: &str) -> Result<Self, AuthError> {
        let hashed = hash(raw, DEFAULT_COST).map_err(|err| AuthError::Hash(err.to_string()))?;
        Ok(Self(hashed))
    }

    /// Checks a raw password against the stored hash. A malformed
    /// stored hash counts as a failed check rather than an error.
    pub fn verify(&self, raw: &str) -> bool {
        verify(raw, &self.0).unwrap_or(false)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

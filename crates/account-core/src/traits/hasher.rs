//! Password hashing port

use crate::error::AccountError;

/// One-way, salted password hashing primitive
pub trait CredentialHasher: Send + Sync {
    /// Hash a plaintext password with a fresh salt
    fn hash(&self, plaintext: &str) -> Result<String, AccountError>;

    /// Compare a plaintext candidate against a stored hash
    ///
    /// Must run in constant time relative to the candidate and return `false`
    /// for any failure, including an empty or malformed `hash`.
    fn compare(&self, hash: &str, plaintext: &str) -> bool;
}

//! Password hashing and verification
//!
//! Uses Argon2id for secure password hashing (OWASP recommended).

use std::fmt;
use std::sync::OnceLock;

use account_core::{AccountError, CredentialHasher};
use argon2::{
    password_hash::{
        self, rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
    },
    Algorithm, Argon2, Params, Version,
};
use serde::Deserialize;
use tracing::warn;

/// Argon2 cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct HashingParams {
    /// Memory cost in KiB
    pub memory_kib: u32,
    /// Number of passes
    pub iterations: u32,
    /// Degree of parallelism
    pub parallelism: u32,
}

impl Default for HashingParams {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

/// Argon2id implementation of [`CredentialHasher`]
///
/// Verification reads the cost parameters from the stored PHC string, so
/// hashes written under older settings keep verifying after a change.
#[derive(Clone)]
pub struct Argon2Hasher {
    argon2: Argon2<'static>,
    // Stand-in verified against when the stored hash is unusable
    dummy_hash: OnceLock<String>,
}

impl Argon2Hasher {
    /// Create a hasher with explicit cost parameters
    ///
    /// # Errors
    /// Returns `AccountError::Hashing` if the parameters are out of range
    pub fn new(params: HashingParams) -> Result<Self, AccountError> {
        let params = Params::new(params.memory_kib, params.iterations, params.parallelism, None)
            .map_err(|e| AccountError::Hashing(format!("Invalid Argon2 parameters: {e}")))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            dummy_hash: OnceLock::new(),
        })
    }

    /// Burn the same work a real verification would, then report a mismatch
    fn reject_with_dummy(&self, plaintext: &str) -> bool {
        let dummy = self.dummy_hash.get_or_init(|| {
            let salt = SaltString::generate(&mut OsRng);
            self.argon2
                .hash_password(b"account-dummy-password", &salt)
                .map(|hash| hash.to_string())
                .unwrap_or_default()
        });

        if let Ok(parsed) = PasswordHash::new(dummy) {
            let _ = self.argon2.verify_password(plaintext.as_bytes(), &parsed);
        }
        false
    }
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self {
            argon2: Argon2::default(),
            dummy_hash: OnceLock::new(),
        }
    }
}

impl fmt::Debug for Argon2Hasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Argon2Hasher")
            .field("params", self.argon2.params())
            .finish_non_exhaustive()
    }
}

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, plaintext: &str) -> Result<String, AccountError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AccountError::Hashing(e.to_string()))
    }

    fn compare(&self, hash: &str, plaintext: &str) -> bool {
        let parsed = match PasswordHash::new(hash) {
            Ok(parsed) if is_verifiable(&parsed) => parsed,
            _ => {
                if !hash.is_empty() {
                    warn!("Stored password hash is not a usable Argon2 PHC string");
                }
                return self.reject_with_dummy(plaintext);
            }
        };

        match self.argon2.verify_password(plaintext.as_bytes(), &parsed) {
            Ok(()) => true,
            Err(password_hash::Error::Password) => false,
            Err(e) => {
                warn!(error = %e, "Stored password hash could not be verified");
                self.reject_with_dummy(plaintext)
            }
        }
    }
}

/// An Argon2 hash with an output to compare against
fn is_verifiable(parsed: &PasswordHash<'_>) -> bool {
    parsed.hash.is_some() && Algorithm::try_from(parsed.algorithm).is_ok()
}

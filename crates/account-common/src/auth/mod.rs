//! Credential utilities

mod password;
mod verification;

pub use password::{Argon2Hasher, HashingParams};
pub use verification::{
    generate_verification_token, DEFAULT_TOKEN_LENGTH, MAX_TOKEN_LENGTH, MIN_TOKEN_LENGTH,
};

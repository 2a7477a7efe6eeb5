//! # account-core
//!
//! Domain layer containing the user account entity, its identifier, the error
//! taxonomy and the storage / hashing ports it depends on.
//! This crate has zero dependencies on infrastructure (database, hashing backend, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{PublicUser, UserAccount};
pub use error::AccountError;
pub use traits::{CredentialHasher, Inserted, StoreResult, UserStore};
pub use value_objects::UserId;

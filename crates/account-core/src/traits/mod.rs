//! Ports implemented by the infrastructure layer

mod hasher;
mod store;

pub use hasher::CredentialHasher;
pub use store::{Inserted, StoreResult, UserStore};

//! Error types for the domain layer

mod account_error;

pub use account_error::AccountError;

//! Integration test utilities for the account layer
//!
//! This crate provides fixtures and helpers for driving `UserAccount`
//! end-to-end against real store and hasher implementations.


pub use fixtures::*;
pub use helpers::*;

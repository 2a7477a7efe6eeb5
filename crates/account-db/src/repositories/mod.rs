//! Store implementations
//!
//! Each implements `account_core::UserStore` with identical semantics.

mod error;
mod memory;
mod user;

pub use memory::MemoryUserStore;
pub use user::PgUserStore;

//! # account-db
//!
//! Storage layer implementing the `UserStore` port.
//!
//! ## Overview
//!
//! This crate provides two implementations of the store defined in
//! `account-core`:
//!
//! - [`PgUserStore`]: PostgreSQL via SQLx (pool, model, mapper, schema)
//! - [`MemoryUserStore`]: in-process map with the same contract
//!
//! ## Usage
//!
//! ```rust,ignore
//! use account_common::AppConfig;
//! use account_db::pool::{create_pool, run_migrations, DatabaseConfig};
//! use account_db::PgUserStore;
//! use account_core::UserAccount;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::from_env()?;
//!     let pool = create_pool(&DatabaseConfig::from(&config.database)).await?;
//!     run_migrations(&pool).await?;
//!     let store = PgUserStore::new(pool);
//!
//!     let mut user = UserAccount::new("Bruce Wayne", "bruce@wayne.example");
//!     user.create(&store).await?;
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{MemoryUserStore, PgUserStore};

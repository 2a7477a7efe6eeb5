//! # account-common
//!
//! Shared utilities including configuration, password hashing, verification
//! tokens, and telemetry.

pub mod auth;
pub mod config;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{generate_verification_token, Argon2Hasher, HashingParams};
pub use config::{
    AppConfig, AppSettings, ConfigError, DatabaseSettings, Environment, LogSettings,
    VerificationSettings,
};
pub use telemetry::{
    init_tracing, init_tracing_with_config, try_init_tracing, try_init_tracing_with_config,
    TracingConfig, TracingError,
};

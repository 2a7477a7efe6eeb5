//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use serde::Deserialize;
use std::env;
use tracing::Level;

use crate::auth::{
    generate_verification_token, HashingParams, DEFAULT_TOKEN_LENGTH, MAX_TOKEN_LENGTH,
    MIN_TOKEN_LENGTH,
};
use crate::telemetry::TracingConfig;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub password: HashingParams,
    pub verification: VerificationSettings,
    pub log: LogSettings,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Verification token settings
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct VerificationSettings {
    #[serde(default = "default_token_length")]
    pub token_length: usize,
}

impl Default for VerificationSettings {
    fn default() -> Self {
        Self {
            token_length: default_token_length(),
        }
    }
}

impl VerificationSettings {
    /// Generate a fresh token of the configured length
    pub fn issue_token(&self) -> String {
        generate_verification_token(self.token_length)
    }
}

/// Log output settings
#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    /// Level used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

impl LogSettings {
    /// Build the tracing configuration for this environment
    #[must_use]
    pub fn tracing_config(&self, env: Environment) -> TracingConfig {
        let mut config = if env.is_production() {
            TracingConfig::production()
        } else {
            TracingConfig::development()
        };
        config.level = self.level.parse().unwrap_or(config.level);
        config.json = self.json || config.json;
        config
    }
}

// Default value functions
fn default_app_name() -> String {
    "gotham-accounts".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_token_length() -> usize {
    DEFAULT_TOKEN_LENGTH
}

fn default_log_level() -> String {
    Level::INFO.to_string()
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// # Errors
    /// Returns an error if `DATABASE_URL` is missing or a value fails to parse
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = HashingParams::default();

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env: match lookup("APP_ENV") {
                    Some(s) => Environment::parse(&s)
                        .ok_or(ConfigError::InvalidValue("APP_ENV", s))?,
                    None => default_env(),
                },
            },
            database: DatabaseSettings {
                url: lookup("DATABASE_URL").ok_or(ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", default_max_connections)?,
                min_connections: parse_or(&lookup, "DATABASE_MIN_CONNECTIONS", default_min_connections)?,
            },
            password: HashingParams {
                memory_kib: parse_or(&lookup, "PASSWORD_MEMORY_KIB", || defaults.memory_kib)?,
                iterations: parse_or(&lookup, "PASSWORD_ITERATIONS", || defaults.iterations)?,
                parallelism: parse_or(&lookup, "PASSWORD_PARALLELISM", || defaults.parallelism)?,
            },
            verification: VerificationSettings {
                token_length: parse_or(&lookup, "VERIFICATION_TOKEN_LENGTH", default_token_length)?
                    .clamp(MIN_TOKEN_LENGTH, MAX_TOKEN_LENGTH),
            },
            log: LogSettings {
                level: lookup("LOG_LEVEL").unwrap_or_else(default_log_level),
                json: parse_or(&lookup, "LOG_JSON", || false)?,
            },
        })
    }
}

fn parse_or<F, T, D>(lookup: &F, key: &'static str, default: D) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    D: FnOnce() -> T,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key, raw)),
        None => Ok(default()),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

//! Account errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::UserId;

/// Domain layer errors
///
/// Storage implementations return these directly; the domain layer passes
/// them through to callers without recovery.
#[derive(Debug, Error)]
pub enum AccountError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    NotFound(UserId),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    Validation(String),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailTaken,

    #[error("User already persisted: {0}")]
    AlreadyPersisted(UserId),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Password hashing failed: {0}")]
    Hashing(String),
}

impl AccountError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "UNKNOWN_USER",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::EmailTaken => "EMAIL_ALREADY_EXISTS",
            Self::AlreadyPersisted(_) => "ALREADY_PERSISTED",
            Self::StorageUnavailable(_) => "STORAGE_UNAVAILABLE",
            Self::Hashing(_) => "HASHING_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::EmailTaken | Self::AlreadyPersisted(_))
    }

    /// Create a validation error
    pub fn validation(msg: impl std::fmt::Display) -> Self {
        Self::Validation(msg.to_string())
    }
}

impl From<validator::ValidationErrors> for AccountError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

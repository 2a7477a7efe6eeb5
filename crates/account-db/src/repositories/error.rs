//! Error handling utilities for stores

use account_core::{AccountError, UserId};
use sqlx::error::ErrorKind;
use sqlx::Error as SqlxError;

// SQLSTATE 22001: value too long for the column type
const STRING_DATA_RIGHT_TRUNCATION: &str = "22001";

/// Convert SQLx error to AccountError for reads
pub fn map_db_error(e: SqlxError) -> AccountError {
    AccountError::StorageUnavailable(e.to_string())
}

/// Convert SQLx error to AccountError for inserts and updates
///
/// Constraint violations become domain errors; everything else is treated as
/// the storage being unavailable.
pub fn map_write_error(e: SqlxError) -> AccountError {
    if let Some(db_err) = e.as_database_error() {
        match db_err.kind() {
            ErrorKind::UniqueViolation => return AccountError::EmailTaken,
            ErrorKind::CheckViolation | ErrorKind::NotNullViolation => {
                return AccountError::Validation(db_err.message().to_string());
            }
            _ => {}
        }
        if db_err.code().as_deref() == Some(STRING_DATA_RIGHT_TRUNCATION) {
            return AccountError::Validation(db_err.message().to_string());
        }
    }
    map_db_error(e)
}

/// Create a "user not found" error
pub fn user_not_found(id: UserId) -> AccountError {
    AccountError::NotFound(id)
}

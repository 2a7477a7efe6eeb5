//! User database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for users table
///
/// `verified` and `is_administrator` are SMALLINT columns holding 0 or 1.
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub verified: i16,
    pub verification_token: Option<String>,
    pub image_url: Option<String>,
    pub is_administrator: i16,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl UserModel {
    /// Check if user is soft deleted
    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

//! Storage port - the interface `UserAccount` persists through
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Every lookup here only sees live records
//! unless its name says otherwise; implementations bake the tombstone filter
//! into their queries.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::UserAccount;
use crate::error::AccountError;
use crate::value_objects::UserId;

/// Result type for store operations
pub type StoreResult<T> = Result<T, AccountError>;

/// Fields a store assigns when it inserts a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inserted {
    pub id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new record, assigning its ID and timestamps
    ///
    /// Fails with `EmailTaken` if a live record already uses the email.
    async fn insert(&self, user: &UserAccount) -> StoreResult<Inserted>;

    /// Overwrite the live record matching `user.id`, returning the new `updated_at`
    ///
    /// Fails with `NotFound` for unknown or soft-deleted IDs and never touches
    /// `deleted_at`.
    async fn update(&self, user: &UserAccount) -> StoreResult<DateTime<Utc>>;

    /// Set the tombstone on a live record, returning the `deleted_at` written
    ///
    /// Fails with `NotFound` if the record is missing or already deleted; an
    /// existing tombstone is never overwritten.
    async fn soft_delete(&self, id: UserId) -> StoreResult<DateTime<Utc>>;

    /// Find live user by ID
    async fn find_by_id(&self, id: UserId) -> StoreResult<Option<UserAccount>>;

    /// Find user by ID whether or not it is soft-deleted
    async fn find_by_id_with_deleted(&self, id: UserId) -> StoreResult<Option<UserAccount>>;

    /// Find live user by email
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<UserAccount>>;

    /// Find live user with a pending verification token
    async fn find_by_verification_token(&self, token: &str) -> StoreResult<Option<UserAccount>>;

    /// Check if email is already taken by a live record
    async fn email_exists(&self, email: &str) -> StoreResult<bool>;
}

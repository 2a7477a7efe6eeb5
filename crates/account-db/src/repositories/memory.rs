//! In-process implementation of UserStore
//!
//! Mirrors `PgUserStore` semantics: live-only lookups, email unique among
//! live rows, tombstones never overwritten. Every operation runs under one
//! mutex, so check-then-write sequences are atomic.

use std::collections::BTreeMap;

use account_core::{AccountError, Inserted, StoreResult, UserAccount, UserId, UserStore};
use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};
use parking_lot::Mutex;
use tracing::instrument;

use super::error::user_not_found;

#[derive(Debug, Default)]
struct MemoryState {
    last_id: u64,
    rows: BTreeMap<UserId, UserAccount>,
}

impl MemoryState {
    fn email_taken(&self, email: &str, except: Option<UserId>) -> bool {
        self.rows
            .values()
            .any(|row| !row.is_deleted() && row.email == email && Some(row.id) != except)
    }

    fn live(&self, id: UserId) -> Option<&UserAccount> {
        self.rows.get(&id).filter(|row| !row.is_deleted())
    }
}

/// In-memory UserStore, useful for tests and embedding
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    state: Mutex<MemoryState>,
}

impl MemoryUserStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows, tombstoned ones included
    pub fn len(&self) -> usize {
        self.state.lock().rows.len()
    }

    /// Check if the store holds no rows at all
    pub fn is_empty(&self) -> bool {
        self.state.lock().rows.is_empty()
    }
}

fn now_seconds() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

#[async_trait]
impl UserStore for MemoryUserStore {
    #[instrument(skip(self, user), fields(email = %user.email))]
    async fn insert(&self, user: &UserAccount) -> StoreResult<Inserted> {
        let mut state = self.state.lock();
        if state.email_taken(&user.email, None) {
            return Err(AccountError::EmailTaken);
        }

        state.last_id += 1;
        let now = now_seconds();
        let inserted = Inserted {
            id: UserId::new(state.last_id),
            created_at: now,
            updated_at: now,
        };

        let mut row = user.clone();
        row.id = inserted.id;
        row.created_at = now;
        row.updated_at = now;
        row.deleted_at = None;
        state.rows.insert(row.id, row);

        Ok(inserted)
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn update(&self, user: &UserAccount) -> StoreResult<DateTime<Utc>> {
        let mut state = self.state.lock();
        if state.live(user.id).is_none() {
            return Err(user_not_found(user.id));
        }
        if state.email_taken(&user.email, Some(user.id)) {
            return Err(AccountError::EmailTaken);
        }

        let now = now_seconds();
        let row = state
            .rows
            .get_mut(&user.id)
            .ok_or_else(|| user_not_found(user.id))?;

        // created_at and deleted_at belong to storage
        row.name.clone_from(&user.name);
        row.email.clone_from(&user.email);
        row.password_hash.clone_from(&user.password_hash);
        row.verified = user.verified;
        row.verification_token.clone_from(&user.verification_token);
        row.image_url.clone_from(&user.image_url);
        row.is_administrator = user.is_administrator;
        row.updated_at = now;

        Ok(now)
    }

    #[instrument(skip(self))]
    async fn soft_delete(&self, id: UserId) -> StoreResult<DateTime<Utc>> {
        let mut state = self.state.lock();
        let row = state
            .rows
            .get_mut(&id)
            .filter(|row| !row.is_deleted())
            .ok_or_else(|| user_not_found(id))?;

        let now = now_seconds();
        row.deleted_at = Some(now);
        Ok(now)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: UserId) -> StoreResult<Option<UserAccount>> {
        Ok(self.state.lock().live(id).cloned())
    }

    #[instrument(skip(self))]
    async fn find_by_id_with_deleted(&self, id: UserId) -> StoreResult<Option<UserAccount>> {
        Ok(self.state.lock().rows.get(&id).cloned())
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<UserAccount>> {
        let state = self.state.lock();
        Ok(state
            .rows
            .values()
            .find(|row| !row.is_deleted() && row.email == email)
            .cloned())
    }

    #[instrument(skip(self, token))]
    async fn find_by_verification_token(&self, token: &str) -> StoreResult<Option<UserAccount>> {
        let state = self.state.lock();
        Ok(state
            .rows
            .values()
            .find(|row| !row.is_deleted() && row.verification_token.as_deref() == Some(token))
            .cloned())
    }

    #[instrument(skip(self))]
    async fn email_exists(&self, email: &str) -> StoreResult<bool> {
        Ok(self.state.lock().email_taken(email, None))
    }
}

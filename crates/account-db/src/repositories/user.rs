//! PostgreSQL implementation of UserStore

use account_core::{Inserted, StoreResult, UserAccount, UserId, UserStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use crate::mappers::flag_to_db;
use crate::models::UserModel;

use super::error::{map_db_error, map_write_error, user_not_found};

/// PostgreSQL implementation of UserStore
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    /// Create a new PgUserStore
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Borrow the underlying pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[derive(sqlx::FromRow)]
struct InsertedRow {
    id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[async_trait]
impl UserStore for PgUserStore {
    #[instrument(skip(self, user), fields(email = %user.email))]
    async fn insert(&self, user: &UserAccount) -> StoreResult<Inserted> {
        let row = sqlx::query_as::<_, InsertedRow>(
            r"
            INSERT INTO users (name, email, password_hash, verified, verification_token,
                               image_url, is_administrator, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7,
                    date_trunc('second', NOW()), date_trunc('second', NOW()))
            RETURNING id, created_at, updated_at
            ",
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(flag_to_db(user.verified))
        .bind(&user.verification_token)
        .bind(&user.image_url)
        .bind(flag_to_db(user.is_administrator))
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(Inserted {
            id: UserId::from_i64(row.id),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn update(&self, user: &UserAccount) -> StoreResult<DateTime<Utc>> {
        let key = user.id.as_i64().ok_or_else(|| user_not_found(user.id))?;
        let updated_at = sqlx::query_scalar::<_, DateTime<Utc>>(
            r"
            UPDATE users
            SET name = $2, email = $3, password_hash = $4, verified = $5,
                verification_token = $6, image_url = $7, is_administrator = $8,
                updated_at = date_trunc('second', NOW())
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING updated_at
            ",
        )
        .bind(key)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(flag_to_db(user.verified))
        .bind(&user.verification_token)
        .bind(&user.image_url)
        .bind(flag_to_db(user.is_administrator))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error)?;

        updated_at.ok_or_else(|| user_not_found(user.id))
    }

    #[instrument(skip(self))]
    async fn soft_delete(&self, id: UserId) -> StoreResult<DateTime<Utc>> {
        let key = id.as_i64().ok_or_else(|| user_not_found(id))?;
        let deleted_at = sqlx::query_scalar::<_, DateTime<Utc>>(
            r"
            UPDATE users
            SET deleted_at = date_trunc('second', NOW())
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING deleted_at
            ",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        deleted_at.ok_or_else(|| user_not_found(id))
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: UserId) -> StoreResult<Option<UserAccount>> {
        let Some(key) = id.as_i64() else {
            return Ok(None);
        };
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, name, email, password_hash, verified, verification_token, image_url,
                   is_administrator, created_at, updated_at, deleted_at
            FROM users
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(UserAccount::from))
    }

    #[instrument(skip(self))]
    async fn find_by_id_with_deleted(&self, id: UserId) -> StoreResult<Option<UserAccount>> {
        let Some(key) = id.as_i64() else {
            return Ok(None);
        };
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, name, email, password_hash, verified, verification_token, image_url,
                   is_administrator, created_at, updated_at, deleted_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(UserAccount::from))
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<UserAccount>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, name, email, password_hash, verified, verification_token, image_url,
                   is_administrator, created_at, updated_at, deleted_at
            FROM users
            WHERE email = $1 AND deleted_at IS NULL
            ",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(UserAccount::from))
    }

    #[instrument(skip(self, token))]
    async fn find_by_verification_token(&self, token: &str) -> StoreResult<Option<UserAccount>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, name, email, password_hash, verified, verification_token, image_url,
                   is_administrator, created_at, updated_at, deleted_at
            FROM users
            WHERE verification_token = $1 AND deleted_at IS NULL
            ",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(UserAccount::from))
    }

    #[instrument(skip(self))]
    async fn email_exists(&self, email: &str) -> StoreResult<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM users WHERE email = $1 AND deleted_at IS NULL)
            ",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }
}

//! Schema setup

use sqlx::postgres::PgPool;
use tracing::info;

/// Schema for the users table; every statement is idempotent
pub const SCHEMA: &str = include_str!("../../migrations/0001_create_users.sql");

/// Apply the users schema to the connected database
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(SCHEMA).execute(pool).await?;
    info!("Users schema is up to date");
    Ok(())
}

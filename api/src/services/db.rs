//! Postgres pool setup
//!
//! [`connect`] opens the pool and applies the embedded [`MIGRATOR`] before
//! the server accepts requests. `#[sqlx::test]` reuses the same migrator.

use sqlx::PgPool;
use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::PgPoolOptions;

/// Schema migrations embedded from `api/migrations`
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("failed to connect to database: {0}")]
    Connect(#[from] sqlx::Error),
    #[error("failed to run migrations: {0}")]
    Migrate(#[from] MigrateError),
}

/// Open a pool and bring the schema up to date
pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, DbError> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    MIGRATOR.run(&pool).await?;
    tracing::info!(max_connections, "database pool ready, migrations applied");

    Ok(pool)
}

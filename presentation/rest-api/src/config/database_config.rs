use anyhow::Context;
use persistence::db::{DatabaseConfig, create_postgres_pool};
use sqlx::PgPool;
use std::env;

/// Initialize database connection pool from environment variables
///
/// Environment variables:
/// - DATABASE_URL: PostgreSQL connection string (required)
///
/// The pool is sized to hold at least `concurrent_queries` connections.
///
/// # Errors
/// Returns error if DATABASE_URL is not set or connection fails
pub async fn init_database(concurrent_queries: usize) -> anyhow::Result<PgPool> {
    let db_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let connections = u32::try_from(concurrent_queries).unwrap_or(u32::MAX);
    let config = DatabaseConfig::new(db_url).with_min_connections(connections);
    let pool = create_postgres_pool(&config).await?;
    Ok(pool)
}

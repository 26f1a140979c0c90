use sqlx::postgres::{PgPool, PgPoolOptions};
use std::{env, time::Duration};

use roster_app::config::Config;
use roster_types::errors::{ApplicationError, DbError};

pub type DbPool = PgPool;

pub async fn establish_connection_pool(config: &Config) -> Result<DbPool, ApplicationError> {
    let database_url = config.database_url.as_deref().ok_or_else(|| {
        ApplicationError::Infrastructure("DATABASE_URL must be set".to_string())
    })?;

    init_connection_pool(database_url, config.db_max_connections).await
}

pub async fn establish_test_connection_pool() -> Result<DbPool, ApplicationError> {
    dotenvy::dotenv().ok();

    let database_url = env::var("TEST_DATABASE_URL").map_err(|_| {
        ApplicationError::Infrastructure("TEST_DATABASE_URL must be set".to_string())
    })?;

    init_connection_pool(&database_url, 5).await
}

async fn init_connection_pool(
    database_url: &str,
    max_connections: u32,
) -> Result<DbPool, ApplicationError> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
        .map_err(DbError::Database)?;

    tracing::info!(max_connections, "Database connection pool established");
    Ok(pool)
}

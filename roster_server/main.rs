use std::sync::Arc;

use roster_app::{
    Ctx,
    config::{Config, StoreKind},
    repository::PlayerRepository,
};
use roster_db::{
    DbPool, InMemoryPlayerRepository, PostgresPlayerRepository, establish_connection_pool,
};
use roster_types::{Result, errors::ApplicationError};
use roster_web::{AppState, WebRouter};

mod logs;
use logs::setup_logging;

#[tokio::main]
async fn main() -> Result<(), ApplicationError> {
    let _log_guard = setup_logging();
    let config = Config::from_env()?;

    let (players, pool) = setup_store(&config).await?;
    players.initialize(&Ctx::background()).await?;

    let state = AppState::new(players, &config);
    let served = WebRouter::serve(state, config.port, shutdown_signal()).await;

    if let Some(pool) = pool {
        pool.close().await;
        tracing::info!("Database connection pool closed.");
    }
    served
}

async fn setup_store(
    config: &Config,
) -> Result<(Arc<dyn PlayerRepository>, Option<DbPool>), ApplicationError> {
    match config.store {
        StoreKind::Memory => {
            tracing::info!(
                "Using the in-memory player store ({:?} on key collision).",
                config.key_collision
            );
            let repo = InMemoryPlayerRepository::with_collision_policy(config.key_collision);
            Ok((Arc::new(repo), None))
        }
        StoreKind::Postgres => {
            tracing::info!("Using the PostgreSQL player store.");
            let pool = establish_connection_pool(config).await?;
            let repo = PostgresPlayerRepository::new(pool.clone());
            Ok((Arc::new(repo), Some(pool)))
        }
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received."),
        Err(e) => {
            tracing::error!("Unable to listen for the shutdown signal: {e}");
            std::future::pending::<()>().await;
        }
    }
}

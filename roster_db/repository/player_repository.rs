use sqlx::{Postgres, pool::PoolConnection};

use roster_app::{Ctx, repository::PlayerRepository};
use roster_types::{
    common::{Player, PlayerKey, PlayerSelector},
    errors::{ApplicationError, DbError},
};

use crate::{
    connection::DbPool,
    error::{into_db_error, into_scan_error},
    mapping::key_to_id,
    models::{self as db_models},
};

const SCHEMA: [&str; 2] = [
    r#"
    CREATE TABLE IF NOT EXISTS players (
        id          BIGINT GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
        kit_number  TEXT NOT NULL,
        first_name  TEXT NOT NULL,
        last_name   TEXT NOT NULL,
        nationality TEXT NOT NULL,
        position    TEXT NOT NULL
    )
    "#,
    r#"
    CREATE UNIQUE INDEX IF NOT EXISTS players_full_name_key
        ON players (first_name, last_name)
    "#,
];

/// Implements PlayerRepository on a `players` table.
///
/// Each call checks a connection out of the shared pool and hands it back
/// when the call returns, whatever the outcome.
#[derive(Debug, Clone)]
pub struct PostgresPlayerRepository {
    pool: DbPool,
}

impl PostgresPlayerRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn acquire(&self, ctx: &Ctx) -> Result<PoolConnection<Postgres>, ApplicationError> {
        let conn = ctx
            .run(self.pool.acquire())
            .await?
            .map_err(DbError::Database)?;
        Ok(conn)
    }
}

#[async_trait::async_trait]
impl PlayerRepository for PostgresPlayerRepository {
    async fn initialize(&self, ctx: &Ctx) -> Result<(), ApplicationError> {
        let mut conn = ctx
            .run(self.pool.acquire())
            .await?
            .map_err(DbError::Schema)?;

        for statement in SCHEMA {
            ctx.run(sqlx::query(statement).execute(&mut *conn))
                .await?
                .map_err(DbError::Schema)?;
        }

        tracing::debug!("players table ready");
        Ok(())
    }

    async fn create(&self, ctx: &Ctx, player: Player) -> Result<Player, ApplicationError> {
        let mut conn = self.acquire(ctx).await?;

        let row = ctx
            .run(
                sqlx::query_as::<_, db_models::Player>(
                    r#"
                    INSERT INTO players (kit_number, first_name, last_name, nationality, position)
                    VALUES ($1, $2, $3, $4, $5)
                    RETURNING id, kit_number, first_name, last_name, nationality, position
                    "#,
                )
                .bind(&player.kit_number)
                .bind(&player.first_name)
                .bind(&player.last_name)
                .bind(&player.nationality)
                .bind(&player.position)
                .fetch_one(&mut *conn),
            )
            .await?
            .map_err(|e| {
                into_db_error(
                    e,
                    PlayerSelector::by_name(&player.first_name, &player.last_name),
                )
            })?;

        tracing::debug!(id = row.id, "Created player");
        Ok(row.into())
    }

    async fn get(&self, ctx: &Ctx, selector: &PlayerSelector) -> Result<Player, ApplicationError> {
        let not_found = || ApplicationError::Db(DbError::PlayerNotFound(selector.clone()));

        let query = match selector {
            PlayerSelector::ByKey(key) => {
                let id = key_to_id(key).ok_or_else(not_found)?;
                sqlx::query_as::<_, db_models::Player>(
                    r#"
                    SELECT id, kit_number, first_name, last_name, nationality, position
                    FROM players
                    WHERE id = $1
                    "#,
                )
                .bind(id)
            }
            PlayerSelector::ByName {
                first_name,
                last_name,
            } => sqlx::query_as::<_, db_models::Player>(
                r#"
                SELECT id, kit_number, first_name, last_name, nationality, position
                FROM players
                WHERE first_name = $1 AND last_name = $2
                ORDER BY id
                LIMIT 1
                "#,
            )
            .bind(first_name)
            .bind(last_name),
        };

        let mut conn = self.acquire(ctx).await?;
        let row = ctx
            .run(query.fetch_optional(&mut *conn))
            .await?
            .map_err(|e| into_db_error(e, selector.clone()))?
            .ok_or_else(not_found)?;

        Ok(row.into())
    }

    async fn list(&self, ctx: &Ctx) -> Result<Vec<Player>, ApplicationError> {
        let mut conn = self.acquire(ctx).await?;

        // A row that fails to decode fails the whole listing.
        let rows = ctx
            .run(
                sqlx::query_as::<_, db_models::Player>(
                    r#"
                    SELECT id, kit_number, first_name, last_name, nationality, position
                    FROM players
                    ORDER BY id
                    "#,
                )
                .fetch_all(&mut *conn),
            )
            .await?
            .map_err(into_scan_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update(
        &self,
        ctx: &Ctx,
        key: &PlayerKey,
        player: Player,
    ) -> Result<Player, ApplicationError> {
        let selector = PlayerSelector::ByKey(key.clone());
        let id = key_to_id(key).ok_or_else(|| DbError::PlayerNotFound(selector.clone()))?;
        let mut conn = self.acquire(ctx).await?;

        let row = ctx
            .run(
                sqlx::query_as::<_, db_models::Player>(
                    r#"
                    UPDATE players
                    SET kit_number = $1, first_name = $2, last_name = $3, nationality = $4, position = $5
                    WHERE id = $6
                    RETURNING id, kit_number, first_name, last_name, nationality, position
                    "#,
                )
                .bind(&player.kit_number)
                .bind(&player.first_name)
                .bind(&player.last_name)
                .bind(&player.nationality)
                .bind(&player.position)
                .bind(id)
                .fetch_optional(&mut *conn),
            )
            .await?
            .map_err(|e| {
                into_db_error(
                    e,
                    PlayerSelector::by_name(&player.first_name, &player.last_name),
                )
            })?
            .ok_or(DbError::PlayerNotFound(selector))?;

        tracing::debug!(id, "Updated player");
        Ok(row.into())
    }

    async fn delete(&self, ctx: &Ctx, key: &PlayerKey) -> Result<(), ApplicationError> {
        let selector = PlayerSelector::ByKey(key.clone());
        let id = key_to_id(key).ok_or_else(|| DbError::PlayerNotFound(selector.clone()))?;
        let mut conn = self.acquire(ctx).await?;

        let result = ctx
            .run(
                sqlx::query("DELETE FROM players WHERE id = $1")
                    .bind(id)
                    .execute(&mut *conn),
            )
            .await?
            .map_err(|e| into_db_error(e, selector.clone()))?;

        if result.rows_affected() == 0 {
            return Err(DbError::PlayerNotFound(selector).into());
        }

        tracing::debug!(id, "Deleted player");
        Ok(())
    }
}

use std::{collections::HashMap, sync::Arc};
use tokio::sync::{Mutex, MutexGuard};

use roster_app::{
    Ctx,
    repository::{KeyCollision, PlayerRepository},
};
use roster_types::{
    common::{Player, PlayerKey, PlayerSelector},
    errors::{ApplicationError, DbError},
};

/// Volatile PlayerRepository keyed by caller-derived keys.
///
/// All reads and writes go through one mutex, so concurrent callers never
/// observe a half-written record. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPlayerRepository {
    players: Arc<Mutex<HashMap<PlayerKey, Player>>>,
    collision: KeyCollision,
}

impl InMemoryPlayerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collision_policy(collision: KeyCollision) -> Self {
        Self {
            collision,
            ..Self::default()
        }
    }

    async fn lock(
        &self,
        ctx: &Ctx,
    ) -> Result<MutexGuard<'_, HashMap<PlayerKey, Player>>, ApplicationError> {
        Ok(ctx.run(self.players.lock()).await?)
    }
}

#[async_trait::async_trait]
impl PlayerRepository for InMemoryPlayerRepository {
    async fn initialize(&self, ctx: &Ctx) -> Result<(), ApplicationError> {
        ctx.run(async {}).await?;
        Ok(())
    }

    async fn create(&self, ctx: &Ctx, player: Player) -> Result<Player, ApplicationError> {
        let key = match &player.key {
            Some(key) if !key.as_str().is_empty() => key.clone(),
            _ => return Err(DbError::MissingKey.into()),
        };

        let mut players = self.lock(ctx).await?;
        if self.collision == KeyCollision::Reject && players.contains_key(&key) {
            return Err(DbError::Duplicate(key.to_string()).into());
        }

        if players.insert(key.clone(), player.clone()).is_some() {
            tracing::debug!(%key, "Overwrote player");
        }
        Ok(player)
    }

    async fn get(&self, ctx: &Ctx, selector: &PlayerSelector) -> Result<Player, ApplicationError> {
        let players = self.lock(ctx).await?;

        let found = match selector {
            PlayerSelector::ByKey(key) => players.get(key),
            PlayerSelector::ByName { .. } => players
                .iter()
                .filter(|(_, p)| selector.matches(p))
                .min_by(|(a, _), (b, _)| a.cmp(b))
                .map(|(_, p)| p),
        };

        found
            .cloned()
            .ok_or_else(|| DbError::PlayerNotFound(selector.clone()).into())
    }

    async fn list(&self, ctx: &Ctx) -> Result<Vec<Player>, ApplicationError> {
        let players = self.lock(ctx).await?;
        let mut list: Vec<Player> = players.values().cloned().collect();
        list.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(list)
    }

    async fn update(
        &self,
        ctx: &Ctx,
        key: &PlayerKey,
        player: Player,
    ) -> Result<Player, ApplicationError> {
        let mut players = self.lock(ctx).await?;
        let stored = players
            .get_mut(key)
            .ok_or_else(|| DbError::PlayerNotFound(PlayerSelector::ByKey(key.clone())))?;

        *stored = Player {
            key: Some(key.clone()),
            ..player
        };
        Ok(stored.clone())
    }

    async fn delete(&self, ctx: &Ctx, key: &PlayerKey) -> Result<(), ApplicationError> {
        let mut players = self.lock(ctx).await?;
        players
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| DbError::PlayerNotFound(PlayerSelector::ByKey(key.clone())).into())
    }
}

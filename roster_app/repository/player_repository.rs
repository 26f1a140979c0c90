use std::str::FromStr;

use roster_types::common::{Player, PlayerKey, PlayerSelector};
use roster_types::errors::ApplicationError;

use crate::context::Ctx;

/// Storage contract shared by every player backend.
///
/// Every call is bounded by the given [`Ctx`]: a canceled context or an
/// expired deadline aborts the call with `DbError::Canceled` or
/// `DbError::DeadlineExceeded`.
#[async_trait::async_trait]
pub trait PlayerRepository: Send + Sync {
    /// Prepares the backend. Safe to call more than once.
    async fn initialize(&self, ctx: &Ctx) -> Result<(), ApplicationError>;

    /// Stores a new player and returns it annotated with its key.
    async fn create(&self, ctx: &Ctx, player: Player) -> Result<Player, ApplicationError>;

    /// Returns exactly one player matching the selector.
    async fn get(&self, ctx: &Ctx, selector: &PlayerSelector) -> Result<Player, ApplicationError>;

    /// Returns all players, empty when nothing is stored.
    async fn list(&self, ctx: &Ctx) -> Result<Vec<Player>, ApplicationError>;

    /// Replaces every informational field of the player stored under `key`.
    async fn update(
        &self,
        ctx: &Ctx,
        key: &PlayerKey,
        player: Player,
    ) -> Result<Player, ApplicationError>;

    /// Removes the player stored under `key`.
    async fn delete(&self, ctx: &Ctx, key: &PlayerKey) -> Result<(), ApplicationError>;
}

/// What a keyed store does when `create` hits a key already in use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyCollision {
    /// Last write wins.
    #[default]
    Overwrite,
    /// Fail with `DbError::Duplicate`.
    Reject,
}

impl FromStr for KeyCollision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overwrite" => Ok(KeyCollision::Overwrite),
            "reject" => Ok(KeyCollision::Reject),
            other => Err(format!("unknown key collision policy '{other}'")),
        }
    }
}

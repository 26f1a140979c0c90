#[cfg(any(test, feature = "test-utils"))]
pub mod tests {
    use async_trait::async_trait;
    use rand::Rng;

    use roster_types::{
        common::{Player, PlayerKey, PlayerSelector},
        errors::{ApplicationError, BackendError, DbError, ErrorKind},
    };

    use crate::{context::Ctx, repository::PlayerRepository};

    #[derive(Default, Clone)]
    pub struct PlayerFactoryOptions<'a> {
        pub key: Option<&'a str>,
        pub kit_number: Option<&'a str>,
        pub first_name: Option<&'a str>,
        pub last_name: Option<&'a str>,
        pub nationality: Option<&'a str>,
        pub position: Option<&'a str>,
    }

    /// Builds a player; unset names get a random suffix so they don't collide.
    pub fn player_factory(options: PlayerFactoryOptions) -> Player {
        let suffix = rand::thread_rng().r#gen::<u32>();
        Player {
            key: options.key.map(PlayerKey::from),
            kit_number: options.kit_number.unwrap_or("9").to_string(),
            first_name: options
                .first_name
                .map_or(format!("First{suffix}"), |s| s.to_string()),
            last_name: options
                .last_name
                .map_or(format!("Last{suffix}"), |s| s.to_string()),
            nationality: options.nationality.unwrap_or("Italy").to_string(),
            position: options.position.unwrap_or("Midfielder").to_string(),
        }
    }

    /// A repository whose every call fails with an error of the given kind.
    #[derive(Clone)]
    pub struct FailingPlayerRepository {
        kind: ErrorKind,
    }

    impl FailingPlayerRepository {
        pub fn new(kind: ErrorKind) -> Self {
            Self { kind }
        }

        fn error(&self, selector: PlayerSelector) -> ApplicationError {
            let err = match self.kind {
                ErrorKind::Duplicate => DbError::Duplicate(selector.to_string()),
                ErrorKind::NotFound => DbError::PlayerNotFound(selector),
                ErrorKind::Schema => DbError::Schema(backend_unavailable()),
                ErrorKind::Canceled => DbError::DeadlineExceeded,
                ErrorKind::Invalid => DbError::MissingKey,
                ErrorKind::Backend => DbError::Database(backend_unavailable()),
            };
            err.into()
        }
    }

    fn backend_unavailable() -> BackendError {
        BackendError::PoolClosed
    }

    #[async_trait]
    impl PlayerRepository for FailingPlayerRepository {
        async fn initialize(&self, _ctx: &Ctx) -> Result<(), ApplicationError> {
            Err(self.error(PlayerSelector::ByKey("".into())))
        }

        async fn create(&self, _ctx: &Ctx, player: Player) -> Result<Player, ApplicationError> {
            Err(self.error(PlayerSelector::by_name(player.first_name, player.last_name)))
        }

        async fn get(
            &self,
            _ctx: &Ctx,
            selector: &PlayerSelector,
        ) -> Result<Player, ApplicationError> {
            Err(self.error(selector.clone()))
        }

        async fn list(&self, _ctx: &Ctx) -> Result<Vec<Player>, ApplicationError> {
            Err(self.error(PlayerSelector::ByKey("".into())))
        }

        async fn update(
            &self,
            _ctx: &Ctx,
            key: &PlayerKey,
            _player: Player,
        ) -> Result<Player, ApplicationError> {
            Err(self.error(PlayerSelector::ByKey(key.clone())))
        }

        async fn delete(&self, _ctx: &Ctx, key: &PlayerKey) -> Result<(), ApplicationError> {
            Err(self.error(PlayerSelector::ByKey(key.clone())))
        }
    }
}

mod player_repository;

pub use player_repository::{KeyCollision, PlayerRepository};

mod helpers;
mod home;
mod players;

pub use helpers::ApiError;
pub use home::home_handler;
pub use players::{
    NameQuery, create_player, delete_player, get_player, list_players, lookup_player,
    update_player,
};

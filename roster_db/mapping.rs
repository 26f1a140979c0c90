use roster_types::common::{Player, PlayerKey};

use crate::models as db_models;

impl From<db_models::Player> for Player {
    fn from(p: db_models::Player) -> Self {
        Player {
            key: Some(PlayerKey::from(p.id)),
            kit_number: p.kit_number,
            first_name: p.first_name,
            last_name: p.last_name,
            nationality: p.nationality,
            position: p.position,
        }
    }
}

/// Parses a key into the identity column value. Only the canonical decimal
/// form of a positive id addresses a row, so `"+5"` or `"005"` address nothing.
pub fn key_to_id(key: &PlayerKey) -> Option<i64> {
    key.as_str()
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0 && id.to_string() == key.as_str())
}

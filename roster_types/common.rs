use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Opaque addressing key of a stored player.
///
/// The in-memory store uses the caller-derived slug (`leo-messi`), the
/// relational store the decimal rendering of its identity column (`42`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerKey(String);

impl PlayerKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<i64> for PlayerKey {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PlayerKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl From<&str> for PlayerKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl fmt::Display for PlayerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<PlayerKey>,
    #[serde(deserialize_with = "deserialize_kit_number")]
    pub kit_number: String,
    pub first_name: String,
    pub last_name: String,
    pub nationality: String,
    pub position: String,
}

impl Player {
    pub fn new(
        kit_number: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        nationality: impl Into<String>,
        position: impl Into<String>,
    ) -> Self {
        Self {
            key: None,
            kit_number: kit_number.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            nationality: nationality.into(),
            position: position.into(),
        }
    }

    pub fn with_key(mut self, key: impl Into<PlayerKey>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Compares the informational fields, ignoring the key.
    pub fn same_fields(&self, other: &Player) -> bool {
        self.kit_number == other.kit_number
            && self.first_name == other.first_name
            && self.last_name == other.last_name
            && self.nationality == other.nationality
            && self.position == other.position
    }

    /// Returns the name of the first empty informational field, if any.
    pub fn missing_field(&self) -> Option<&'static str> {
        [
            ("kit_number", &self.kit_number),
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("nationality", &self.nationality),
            ("position", &self.position),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
    }
}

/// Kit numbers arrive either as text (`"10"`) or as a small integer (`10`).
fn deserialize_kit_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum KitNumber {
        Text(String),
        Number(u16),
    }

    Ok(match KitNumber::deserialize(deserializer)? {
        KitNumber::Text(text) => text,
        KitNumber::Number(number) => number.to_string(),
    })
}

/// Selects a single player for lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerSelector {
    ByKey(PlayerKey),
    ByName {
        first_name: String,
        last_name: String,
    },
}

impl PlayerSelector {
    pub fn by_name(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        PlayerSelector::ByName {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    pub fn matches(&self, player: &Player) -> bool {
        match self {
            PlayerSelector::ByKey(key) => player.key.as_ref() == Some(key),
            PlayerSelector::ByName {
                first_name,
                last_name,
            } => player.first_name == *first_name && player.last_name == *last_name,
        }
    }
}

impl From<PlayerKey> for PlayerSelector {
    fn from(key: PlayerKey) -> Self {
        PlayerSelector::ByKey(key)
    }
}

impl fmt::Display for PlayerSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerSelector::ByKey(key) => write!(f, "key '{}'", key),
            PlayerSelector::ByName {
                first_name,
                last_name,
            } => write!(f, "name '{} {}'", first_name, last_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messi() -> Player {
        Player::new("10", "Leo", "Messi", "Argentina", "Forward")
    }

    #[test]
    fn test_same_fields_ignores_key() {
        let a = messi().with_key("leo-messi");
        let b = messi().with_key(7);
        assert!(a.same_fields(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn test_missing_field_reports_first_blank() {
        assert_eq!(messi().missing_field(), None);

        let mut player = messi();
        player.nationality = "  ".to_string();
        player.position = String::new();
        assert_eq!(player.missing_field(), Some("nationality"));
    }

    #[test]
    fn test_selector_matches() {
        let player = messi().with_key("leo-messi");
        assert!(PlayerSelector::ByKey("leo-messi".into()).matches(&player));
        assert!(!PlayerSelector::ByKey("messi".into()).matches(&player));
        assert!(PlayerSelector::by_name("Leo", "Messi").matches(&player));
        assert!(!PlayerSelector::by_name("Lionel", "Messi").matches(&player));
    }

    #[test]
    fn test_player_json_shape() {
        let json = serde_json::to_value(messi()).unwrap();
        assert_eq!(json["kit_number"], "10");
        assert_eq!(json["first_name"], "Leo");
        assert!(json.get("key").is_none(), "unassigned key is omitted");

        let keyed = serde_json::to_value(messi().with_key(42)).unwrap();
        assert_eq!(keyed["key"], "42");

        let parsed: Player = serde_json::from_value(serde_json::json!({
            "kit_number": "10",
            "first_name": "Leo",
            "last_name": "Messi",
            "nationality": "Argentina",
            "position": "Forward"
        }))
        .unwrap();
        assert_eq!(parsed, messi());
    }

    #[test]
    fn test_integer_kit_number() {
        let parsed: Player = serde_json::from_value(serde_json::json!({
            "kit_number": 10,
            "first_name": "Leo",
            "last_name": "Messi",
            "nationality": "Argentina",
            "position": "Forward"
        }))
        .unwrap();
        assert_eq!(parsed.kit_number, "10");
        assert_eq!(parsed, messi());

        let negative = serde_json::from_value::<Player>(serde_json::json!({
            "kit_number": -1,
            "first_name": "Leo",
            "last_name": "Messi",
            "nationality": "Argentina",
            "position": "Forward"
        }));
        assert!(negative.is_err());
    }
}

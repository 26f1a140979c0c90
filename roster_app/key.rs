use roster_types::common::{Player, PlayerKey};

/// Lowercases `input` and joins its alphanumeric runs with single dashes.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;

    for c in input.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Key under which a keyed store files a new player: the slug of its full name.
pub fn derive_key(player: &Player) -> PlayerKey {
    PlayerKey::new(slugify(&format!(
        "{} {}",
        player.first_name, player.last_name
    )))
}

//! Board ID generation
//!
//! All IDs use the format: `{6-char-hex}-{kind}-{slug}`
//! Example: `019430-spot-cafe-a`

/// Generate a board ID from kind and display name
pub fn generate_id(kind: &str, name: &str) -> String {
    let uuid = uuid::Uuid::now_v7();
    let hex_prefix = &uuid.to_string()[..6];
    let slug = slugify(name);
    format!("{}-{}-{}", hex_prefix, kind, slug)
}

/// Slugify a display name for use in IDs
fn slugify(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter_map(|c| {
            if c.is_alphanumeric() {
                Some(c)
            } else if c == '\'' || c == '\u{2019}' || c == '\u{2018}' {
                None // Strip apostrophes (straight and curly)
            } else {
                Some('-')
            }
        })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

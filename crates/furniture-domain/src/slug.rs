//! Slug rules for categories, products and posts.

/// Maximum slug length, matching the `varchar(255)` columns.
pub const MAX_SLUG_LEN: usize = 255;

/// A slug is 1–255 chars of lowercase ASCII letters, digits and single
/// hyphens, and neither starts nor ends with a hyphen.
pub fn is_valid_slug(slug: &str) -> bool {
    if slug.is_empty() || slug.len() > MAX_SLUG_LEN {
        return false;
    }
    if slug.starts_with('-') || slug.ends_with('-') || slug.contains("--") {
        return false;
    }
    slug.chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

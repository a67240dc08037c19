//! Canonical emoji lookup keys.
//!
//! Agents register reactions using whatever textual form is at hand — custom
//! emoji markup, `:shorthand:`, a `name:id` composite, or a literal glyph.
//! Incoming events carry yet other forms. [`normalize_emoji_key`] maps all of
//! them onto one canonical key so registration and lookup agree.

use std::sync::LazyLock;

use regex::Regex;

/// `<a?:name:digits>` — full custom-emoji markup, animated or static.
static CUSTOM_MARKUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<a?:[0-9A-Za-z_]+:([0-9]+)>$").unwrap());

/// `:name:` — shorthand with a name of at least two word/hyphen characters.
static SHORTHAND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^:([0-9A-Za-z_-]{2,}):$").unwrap());

/// `name:digits` — composite custom-emoji form without the angle brackets.
static COMPOSITE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-Za-z_-]+:([0-9]+)$").unwrap());

/// Maps any textual emoji representation to its canonical lookup key.
///
/// Rules are applied in order; the first match wins:
///
/// 1. `<a?:name:digits>` → the digit id
/// 2. `:name:` (name of ≥ 2 word/hyphen chars) → the name
/// 3. `name:digits` → the digits
/// 4. otherwise → the trimmed input verbatim (literal unicode emoji)
///
/// The function is pure and idempotent: normalizing an already-canonical key
/// returns it unchanged.
///
/// # Example
///
/// ```
/// use rivet_framework::normalize_emoji_key;
///
/// assert_eq!(normalize_emoji_key("<:wave:123456789012345678>"), "123456789012345678");
/// assert_eq!(normalize_emoji_key(":wave:"), "wave");
/// assert_eq!(normalize_emoji_key("wave:123456789012345678"), "123456789012345678");
/// assert_eq!(normalize_emoji_key("⭐"), "⭐");
/// ```
pub fn normalize_emoji_key(emoji: &str) -> String {
    let trimmed = emoji.trim();

    if let Some(caps) = CUSTOM_MARKUP.captures(trimmed) {
        return caps[1].to_string();
    }

    if let Some(caps) = SHORTHAND.captures(trimmed) {
        return caps[1].to_string();
    }

    if let Some(caps) = COMPOSITE.captures(trimmed) {
        return caps[1].to_string();
    }

    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_markup_yields_id() {
        assert_eq!(
            normalize_emoji_key("<:wave:123456789012345678>"),
            "123456789012345678"
        );
        assert_eq!(normalize_emoji_key("<a:party_blob:42>"), "42");
    }

    #[test]
    fn shorthand_yields_name() {
        assert_eq!(normalize_emoji_key(":wave:"), "wave");
        assert_eq!(normalize_emoji_key(":tech-support:"), "tech-support");
        // single-character names are not shorthand
        assert_eq!(normalize_emoji_key(":x:"), ":x:");
    }

    #[test]
    fn composite_yields_id() {
        assert_eq!(
            normalize_emoji_key("wave:123456789012345678"),
            "123456789012345678"
        );
    }

    #[test]
    fn literal_passes_through_trimmed() {
        assert_eq!(normalize_emoji_key("⭐"), "⭐");
        assert_eq!(normalize_emoji_key("  ⭐  "), "⭐");
        assert_eq!(normalize_emoji_key("wave"), "wave");
    }

    #[test]
    fn normalization_is_idempotent() {
        for raw in ["<:wave:123>", ":wave:", "wave:123", "⭐", "plain"] {
            let once = normalize_emoji_key(raw);
            assert_eq!(normalize_emoji_key(&once), once, "raw input: {raw}");
        }
    }

    #[test]
    fn malformed_markup_is_literal() {
        // no digits after the second colon
        assert_eq!(normalize_emoji_key("<:wave:abc>"), "<:wave:abc>");
        // unterminated markup
        assert_eq!(normalize_emoji_key("<:wave:123"), "<:wave:123");
    }
}

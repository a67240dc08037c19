//! Reaction and emoji model.

use serde::{Deserialize, Serialize};

use crate::id::{ChannelId, EmojiId, MessageId};

/// The emoji attached to a reaction.
///
/// Custom (server-uploaded) emoji carry a numeric [`EmojiId`] and a name;
/// unicode emoji carry only a name holding the literal glyph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Emoji {
    /// Custom-emoji identifier, absent for unicode emoji.
    #[serde(default)]
    pub id: Option<EmojiId>,
    /// Emoji name, or the literal glyph for unicode emoji.
    #[serde(default)]
    pub name: Option<String>,
    /// Whether the custom emoji is animated.
    #[serde(default)]
    pub animated: bool,
}

impl Emoji {
    /// Creates a unicode emoji from its literal glyph.
    pub fn unicode(glyph: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(glyph.into()),
            animated: false,
        }
    }

    /// Creates a custom emoji from its name and numeric id.
    pub fn custom(name: impl Into<String>, id: impl Into<EmojiId>) -> Self {
        Self {
            id: Some(id.into()),
            name: Some(name.into()),
            animated: false,
        }
    }

    /// Returns the id if present, otherwise the name.
    ///
    /// This mirrors the platform convention that custom emoji are identified
    /// by id and unicode emoji by their glyph.
    pub fn id_or_name(&self) -> Option<&str> {
        self.id
            .as_ref()
            .map(EmojiId::as_str)
            .or(self.name.as_deref())
    }

    /// A best-effort human-readable identifier for log messages.
    pub fn describe(&self) -> &str {
        self.name
            .as_deref()
            .or_else(|| self.id.as_ref().map(EmojiId::as_str))
            .unwrap_or("unknown")
    }
}

/// A fully-hydrated reaction on a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    /// The emoji used.
    pub emoji: Emoji,
    /// The channel of the reacted-to message.
    pub channel_id: ChannelId,
    /// The reacted-to message.
    pub message_id: MessageId,
    /// How many users have added this emoji to the message, including the
    /// one that triggered the current event.
    #[serde(default)]
    pub count: u32,
}

impl Reaction {
    /// Creates a reaction with a count of one.
    pub fn new(
        emoji: Emoji,
        channel_id: impl Into<ChannelId>,
        message_id: impl Into<MessageId>,
    ) -> Self {
        Self {
            emoji,
            channel_id: channel_id.into(),
            message_id: message_id.into(),
            count: 1,
        }
    }

    /// Sets the reaction count.
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_or_name_prefers_id() {
        let custom = Emoji::custom("wave", "123");
        assert_eq!(custom.id_or_name(), Some("123"));

        let unicode = Emoji::unicode("⭐");
        assert_eq!(unicode.id_or_name(), Some("⭐"));

        let empty = Emoji {
            id: None,
            name: None,
            animated: false,
        };
        assert_eq!(empty.id_or_name(), None);
        assert_eq!(empty.describe(), "unknown");
    }
}

//! Identifier newtypes for platform objects.
//!
//! All platform identifiers are opaque strings (snowflakes on most chat
//! platforms). Wrapping them in newtypes keeps a message id from ever being
//! passed where a channel id is expected.

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Creates a new identifier from anything string-like.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(
    /// Identifier of a platform user account.
    UserId
);
string_id!(
    /// Identifier of a channel (text channel, thread, forum, ...).
    ChannelId
);
string_id!(
    /// Identifier of a single message.
    MessageId
);
string_id!(
    /// Identifier of a custom (server-uploaded) emoji.
    EmojiId
);
string_id!(
    /// Identifier of a guild (server).
    GuildId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_and_display() {
        let id = MessageId::new("123456789012345678");
        assert_eq!(id.as_str(), "123456789012345678");
        assert_eq!(id.to_string(), "123456789012345678");
        assert_eq!(MessageId::from("a"), MessageId::new("a"));
    }

    #[test]
    fn ids_serialize_transparently() {
        let id = UserId::new("42");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"42\"");
        let back: UserId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}

//! Platform data model.
//!
//! These are the fully-hydrated shapes of the objects the chat platform
//! delivers. Events may carry them wrapped in [`Partial`](crate::partial::Partial)
//! stubs; nothing in this module is reachable from an event without an
//! explicit resolve step.

pub mod channel;
pub mod message;
pub mod reaction;

pub use channel::{Channel, ChannelKind};
pub use message::{Attachment, Message};
pub use reaction::{Emoji, Reaction};

use serde::{Deserialize, Serialize};

use crate::id::UserId;

/// A platform user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Display/user name.
    pub username: String,
    /// Whether this account is a bot.
    #[serde(default)]
    pub bot: bool,
}

impl User {
    /// Creates a non-bot user.
    pub fn new(id: impl Into<UserId>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            bot: false,
        }
    }

    /// Marks this user as a bot account.
    pub fn as_bot(mut self) -> Self {
        self.bot = true;
        self
    }

    /// Returns the platform mention string for this user.
    pub fn mention(&self) -> String {
        format!("<@{}>", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_mention_format() {
        let user = User::new("99", "ada");
        assert_eq!(user.mention(), "<@99>");
        assert!(!user.bot);
        assert!(User::new("1", "b").as_bot().bot);
    }
}
